//! MailerSend adapter (v1 email API).
//!
//! Accepts any 2xx status as success (MailerSend returns 202 Accepted).
//! Attachments carry only filename and content; this provider's wire shape
//! has no content-type or disposition fields.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::errors::{MailerError, MailerResult};
use crate::observability::{self, LogSink};
use crate::providers::Mailer;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{EmailAddress, Message, Response};

const DEFAULT_BASE_URL: &str = "https://api.mailersend.com";

/// Client for the MailerSend v1 email endpoint.
pub struct MailerSendClient {
    token: SecretString,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    logger: Option<LogSink>,
}

#[derive(Serialize)]
struct WireAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    email: String,
}

impl WireAddress {
    fn new(name: &str, address: &str) -> Self {
        Self {
            name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
            email: address.to_string(),
        }
    }

    fn from_email(address: &EmailAddress) -> Self {
        Self {
            name: address.name.clone(),
            email: address.address.clone(),
        }
    }
}

#[derive(Serialize)]
struct WireAttachment {
    content: String,
    filename: String,
}

#[derive(Serialize)]
struct EmailRequest {
    from: WireAddress,
    to: Vec<WireAddress>,
    subject: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<WireAttachment>,
}

impl MailerSendClient {
    /// Creates a MailerSend client from an API token.
    pub fn new(token: impl Into<String>) -> MailerResult<Self> {
        Ok(Self {
            token: SecretString::new(token.into()),
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
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token.expose_secret()),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    async fn post(&self, request: &EmailRequest) -> MailerResult<Response> {
        let body = serde_json::to_vec(request)?;
        let url = format!("{}/v1/email", self.base_url);

        let started = Instant::now();
        let response = self.transport.post(&url, &self.headers(), body).await?;
        tracing::debug!(
            target: "integrations_mailer",
            elapsed_ms = started.elapsed().as_millis() as u64,
            status_code = response.status_code,
            "mailersend send attempt finished"
        );

        observability::emit(self.logger.as_ref(), &observability::send_log_line(&response));

        if !response.is_success() {
            return Err(MailerError::SendFailure { response });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for MailerSendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerSendClient")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Mailer for MailerSendClient {
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
            from: WireAddress::new(from_name, from_address),
            to: vec![WireAddress::new(to_name, to_address)],
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.to_string(),
            attachments: Vec::new(),
        };
        self.post(&request).await
    }

    async fn send_message(&self, message: &Message) -> MailerResult<Response> {
        message.validate()?;

        let from = message
            .from
            .as_ref()
            .ok_or_else(|| MailerError::validation("missing from email address"))?;

        let request = EmailRequest {
            from: WireAddress::from_email(from),
            to: message.to.iter().map(WireAddress::from_email).collect(),
            subject: message.subject.clone(),
            text: message.text.clone(),
            html: message.html.clone(),
            attachments: message
                .attachments
                .iter()
                .map(|a| WireAttachment {
                    content: a.content.clone(),
                    filename: a.filename.clone(),
                })
                .collect(),
        };

        self.post(&request).await
    }
}
