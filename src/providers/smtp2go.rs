//! SMTP2GO adapter (v3 email send API).
//!
//! The bulk relay has no HTTP-status success semantics: the API key travels
//! in the JSON body, addresses are formatted as `Name <addr>` strings, and
//! success is the absence of an error string in the structured response.
//! On success the normalized response is a synthesized 200 whose body
//! carries the provider's request identifier.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::errors::{MailerError, MailerResult};
use crate::observability::{self, LogSink};
use crate::providers::Mailer;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{EmailAddress, Message, Response};

const DEFAULT_BASE_URL: &str = "https://api.smtp2go.com";

/// Client for the SMTP2GO v3 email send endpoint.
pub struct Smtp2goClient {
    api_key: SecretString,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    logger: Option<LogSink>,
}

#[derive(Serialize)]
struct WireAttachment {
    filename: String,
    fileblob: String,
    mimetype: String,
}

#[derive(Serialize)]
struct EmailRequest {
    api_key: String,
    sender: String,
    to: Vec<String>,
    subject: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    text_body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    html_body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<WireAttachment>,
}

#[derive(Deserialize, Default)]
struct ResponseData {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_code: String,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(default)]
    request_id: String,
    #[serde(default)]
    data: ResponseData,
}

impl Smtp2goClient {
    /// Creates an SMTP2GO client from an API key.
    pub fn new(api_key: impl Into<String>) -> MailerResult<Self> {
        Ok(Self {
            api_key: SecretString::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: Arc::new(ReqwestTransport::new()?),
            logger: None,
        })
    }

    /// Overrides the API base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the log sink for per-send log lines.
    pub fn with_logger(mut self, logger: LogSink) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Replaces the transport (used by tests).
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    async fn post(&self, request: &EmailRequest) -> MailerResult<Response> {
        let body = serde_json::to_vec(request)?;
        let url = format!("{}/v3/email/send", self.base_url);

        let started = Instant::now();
        let http_response = self.transport.post(&url, &self.headers(), body).await?;
        tracing::debug!(
            target: "integrations_mailer",
            elapsed_ms = started.elapsed().as_millis() as u64,
            status_code = http_response.status_code,
            "smtp2go send attempt finished"
        );

        let parsed: SendResponse = serde_json::from_str(&http_response.body)
            .map_err(|_| MailerError::empty_result("smtp2go"))?;

        if !parsed.data.error.is_empty() {
            tracing::debug!(
                target: "integrations_mailer",
                error_code = %parsed.data.error_code,
                "smtp2go reported a send error"
            );
            return Err(MailerError::SendFailure {
                response: http_response,
            });
        }

        // No HTTP-status semantics here: a clean result is reported as 200
        // with the provider's request identifier as the body.
        let response = Response {
            status_code: 200,
            body: format!("RequestId: {}", parsed.request_id),
            headers: http_response.headers,
        };

        observability::emit(self.logger.as_ref(), &observability::send_log_line(&response));
        Ok(response)
    }

    fn wire_request(&self, message: &Message) -> MailerResult<EmailRequest> {
        let from = message
            .from
            .as_ref()
            .ok_or_else(|| MailerError::validation("missing from email address"))?;

        Ok(EmailRequest {
            api_key: self.api_key.expose_secret().clone(),
            sender: from.to_mailbox(),
            to: message.to.iter().map(EmailAddress::to_mailbox).collect(),
            subject: message.subject.clone(),
            text_body: message.text.clone(),
            html_body: message.html.clone(),
            attachments: message
                .attachments
                .iter()
                .map(|a| WireAttachment {
                    filename: a.filename.clone(),
                    fileblob: a.content.clone(),
                    mimetype: a.content_type.clone(),
                })
                .collect(),
        })
    }
}

impl std::fmt::Debug for Smtp2goClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Smtp2goClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Mailer for Smtp2goClient {
    async fn send_mail(
        &self,
        from_name: &str,
        from_address: &str,
        to_name: &str,
        to_address: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> MailerResult<Response> {
        let request = EmailRequest {
            api_key: self.api_key.expose_secret().clone(),
            sender: EmailAddress::with_name(from_name, from_address).to_mailbox(),
            to: vec![EmailAddress::with_name(to_name, to_address).to_mailbox()],
            subject: subject.to_string(),
            text_body: text.to_string(),
            html_body: html.to_string(),
            attachments: Vec::new(),
        };
        self.post(&request).await
    }

    async fn send_message(&self, message: &Message) -> MailerResult<Response> {
        message.validate()?;
        let request = self.wire_request(message)?;
        self.post(&request).await
    }
}
