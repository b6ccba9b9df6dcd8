//! SMTP2GO adapter integration tests.

use integrations_mailer::{Mailer, MailerError, Smtp2goClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::{sample_message, setup_mock_server};

fn client_for(server: &wiremock::MockServer) -> Smtp2goClient {
    Smtp2goClient::new("s2g-key")
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_success_synthesizes_200_with_request_id() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"request_id":"aa11-bb22","data":{"succeeded":2,"failed":0}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .send_message(&sample_message())
        .await
        .unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "RequestId: aa11-bb22");
}

#[tokio::test]
async fn test_api_key_travels_in_body() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"request_id":"r","data":{}}"#),
        )
        .mount(&server)
        .await;

    client_for(&server)
        .send_message(&sample_message())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(json["api_key"], "s2g-key");
    assert_eq!(json["sender"], "Alice <alice@example.com>");
    assert_eq!(
        json["to"],
        serde_json::json!(["Bob <bob@example.com>", "Carol <carol@example.com>"])
    );
    assert_eq!(json["attachments"][0]["mimetype"], "application/pdf");
}

#[tokio::test]
async fn test_error_string_beats_http_200() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"request_id":"r","data":{"error":"invalid api key","error_code":"E_ApiResponseCodes"}}"#,
        ))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_message(&sample_message())
        .await
        .unwrap_err();
    let response = err.response().unwrap();
    assert!(response.body.contains("invalid api key"));
}

#[tokio::test]
async fn test_garbage_body_is_empty_result() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v3/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway error</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_message(&sample_message())
        .await
        .unwrap_err();
    assert!(matches!(err, MailerError::EmptyResult { .. }));
}
