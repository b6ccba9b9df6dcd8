//! SendGrid adapter integration tests.

use integrations_mailer::{Mailer, MailerError, SendGridClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::{sample_message, setup_mock_server};

#[tokio::test]
async fn test_send_message_success_preserves_status() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .and(header("Authorization", "Bearer sg-test-key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_string("")
                .insert_header("x-message-id", "msg-123"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = SendGridClient::new("sg-test-key")
        .unwrap()
        .with_base_url(server.uri());

    let response = client.send_message(&sample_message()).await.unwrap();
    assert_eq!(response.status_code, 202);
    assert_eq!(
        response.headers.get("x-message-id"),
        Some(&vec!["msg-123".to_string()])
    );
}

#[tokio::test]
async fn test_send_message_uses_first_recipient() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let client = SendGridClient::new("sg-test-key")
        .unwrap()
        .with_base_url(server.uri());
    client.send_message(&sample_message()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let to = json["personalizations"][0]["to"].as_array().unwrap();
    assert_eq!(to.len(), 1);
    assert_eq!(to[0]["email"], "bob@example.com");
    assert_eq!(json["from"]["email"], "alice@example.com");
    assert_eq!(json["attachments"][0]["filename"], "report.pdf");
}

#[tokio::test]
async fn test_server_error_surfaces_as_send_failure() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"errors":[{"message":"oops"}]}"#),
        )
        .mount(&server)
        .await;

    let client = SendGridClient::new("sg-test-key")
        .unwrap()
        .with_base_url(server.uri());

    let err = client.send_message(&sample_message()).await.unwrap_err();
    let response = err.response().expect("send failure carries response");
    assert_eq!(response.status_code, 500);
    assert!(response.body.contains("oops"));
}

#[tokio::test]
async fn test_validation_failure_makes_no_request() {
    let server = setup_mock_server().await;

    let client = SendGridClient::new("sg-test-key")
        .unwrap()
        .with_base_url(server.uri());

    let message = integrations_mailer::Message::default();
    let err = client.send_message(&message).await.unwrap_err();
    assert!(matches!(err, MailerError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
