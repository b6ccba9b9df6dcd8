//! SendGrid adapter (v3 mail send API).
//!
//! Accepts any 2xx status as success (SendGrid returns 202 Accepted).
//! SendGrid sends a single email: only the first recipient of a
//! multi-recipient message is used.

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

const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// Client for the SendGrid v3 mail send endpoint.
pub struct SendGridClient {
    api_key: SecretString,
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
struct Personalization {
    to: Vec<WireAddress>,
}

#[derive(Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: String,
}

#[derive(Serialize)]
struct WireAttachment {
    content: String,
    #[serde(rename = "type")]
    content_type: String,
    filename: String,
    disposition: &'static str,
}

#[derive(Serialize)]
struct MailSendRequest {
    from: WireAddress,
    subject: String,
    personalizations: Vec<Personalization>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    content: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<WireAttachment>,
}

impl MailSendRequest {
    fn single(from: WireAddress, to: WireAddress, subject: &str, text: &str, html: &str) -> Self {
        // Plain text must precede HTML in the content array.
        let mut content = Vec::new();
        if !text.is_empty() {
            content.push(Content {
                content_type: "text/plain",
                value: text.to_string(),
            });
        }
        if !html.is_empty() {
            content.push(Content {
                content_type: "text/html",
                value: html.to_string(),
            });
        }
        Self {
            from,
            subject: subject.to_string(),
            personalizations: vec![Personalization { to: vec![to] }],
            content,
            attachments: Vec::new(),
        }
    }
}

impl SendGridClient {
    /// Creates a SendGrid client from an API key.
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
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    async fn post(&self, request: &MailSendRequest) -> MailerResult<Response> {
        let body = serde_json::to_vec(request)?;
        let url = format!("{}/v3/mail/send", self.base_url);

        let started = Instant::now();
        let response = self.transport.post(&url, &self.headers(), body).await?;
        tracing::debug!(
            target: "integrations_mailer",
            elapsed_ms = started.elapsed().as_millis() as u64,
            status_code = response.status_code,
            "sendgrid send attempt finished"
        );

        observability::emit(self.logger.as_ref(), &observability::send_log_line(&response));

        if !response.is_success() {
            return Err(MailerError::SendFailure { response });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for SendGridClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Mailer for SendGridClient {
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
        let request = MailSendRequest::single(
            WireAddress::new(from_name, from_address),
            WireAddress::new(to_name, to_address),
            subject,
            text,
            html,
        );
        self.post(&request).await
    }

    async fn send_message(&self, message: &Message) -> MailerResult<Response> {
        message.validate()?;

        // Validation guarantees a sender and at least one recipient.
        let from = message.from.as_ref().ok_or_else(|| {
            MailerError::validation("missing from email address")
        })?;
        let to = message.primary_recipient().ok_or_else(|| {
            MailerError::validation("missing recipient(s) address")
        })?;

        let mut request = MailSendRequest::single(
            WireAddress::from_email(from),
            WireAddress::from_email(to),
            &message.subject,
            &message.text,
            &message.html,
        );

        for attachment in &message.attachments {
            request.attachments.push(WireAttachment {
                content: attachment.content.clone(),
                content_type: attachment.content_type.clone(),
                filename: attachment.filename.clone(),
                // Always "attachment", regardless of the message's disposition.
                disposition: "attachment",
            });
        }

        self.post(&request).await
    }
}
