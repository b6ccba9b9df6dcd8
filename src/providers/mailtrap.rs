//! Mailtrap sandbox adapter.
//!
//! No SDK and no provider-specific wire structs: the canonical message's
//! serde shape IS this provider's wire format, posted directly to the send
//! endpoint with a bearer token. Success is exactly status 200; a 202 or
//! any other 2xx is rejected.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{MailerError, MailerResult};
use crate::observability::{self, LogSink};
use crate::providers::Mailer;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{Message, Response};

const DEFAULT_BASE_URL: &str = "https://send.api.mailtrap.io";

/// Client for the Mailtrap send endpoint.
pub struct MailtrapClient {
    token: SecretString,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    logger: Option<LogSink>,
}

impl MailtrapClient {
    /// Creates a Mailtrap client from an API token.
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
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token.expose_secret()),
        );
        headers
    }

    async fn post(&self, message: &Message) -> MailerResult<Response> {
        let body = serde_json::to_vec(message)?;
        let url = format!("{}/api/send", self.base_url);

        let started = Instant::now();
        let response = self.transport.post(&url, &self.headers(), body).await?;
        tracing::debug!(
            target: "integrations_mailer",
            elapsed_ms = started.elapsed().as_millis() as u64,
            status_code = response.status_code,
            "mailtrap send attempt finished"
        );

        observability::emit(self.logger.as_ref(), &observability::send_log_line(&response));

        // Exactly 200, not the general 2xx range.
        if response.status_code != 200 {
            return Err(MailerError::SendFailure { response });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for MailtrapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailtrapClient")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Mailer for MailtrapClient {
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
        let message = Message::builder()
            .from(from_name, from_address)
            .recipient(to_name, to_address)
            .subject(subject)
            .text(text)
            .html(html)
            .build()?;

        self.post(&message).await
    }

    async fn send_message(&self, message: &Message) -> MailerResult<Response> {
        message.validate()?;
        self.post(message).await
    }
}
