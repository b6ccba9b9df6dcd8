//! Send-contract tests: callers program against `dyn Mailer` and swap
//! providers without touching call sites.

use integrations_mailer::{Mailer, MailtrapClient, Response, SendGridClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::{sample_message, setup_mock_server};

async fn dispatch(mailer: &dyn Mailer) -> Response {
    mailer
        .send_message(&sample_message())
        .await
        .expect("send succeeds")
}

#[tokio::test]
async fn test_providers_are_interchangeable_behind_the_trait() {
    let sendgrid_server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&sendgrid_server)
        .await;

    let mailtrap_server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&mailtrap_server)
        .await;

    let mailers: Vec<Box<dyn Mailer>> = vec![
        Box::new(
            SendGridClient::new("k")
                .unwrap()
                .with_base_url(sendgrid_server.uri()),
        ),
        Box::new(
            MailtrapClient::new("t")
                .unwrap()
                .with_base_url(mailtrap_server.uri()),
        ),
    ];

    // Identical call site for both providers; only the status differs.
    let statuses: Vec<u16> = vec![
        dispatch(mailers[0].as_ref()).await.status_code,
        dispatch(mailers[1].as_ref()).await.status_code,
    ];
    assert_eq!(statuses, vec![202, 200]);
}

#[tokio::test]
async fn test_send_mail_through_the_trait() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let mailer: Box<dyn Mailer> =
        Box::new(MailtrapClient::new("t").unwrap().with_base_url(server.uri()));

    let response = mailer
        .send_mail(
            "Alice",
            "alice@example.com",
            "Bob",
            "bob@example.com",
            "Hi",
            "text",
            "",
        )
        .await
        .unwrap();
    assert_eq!(response.status_code, 200);
}
