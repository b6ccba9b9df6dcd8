//! Mailjet adapter (v3.1 send API).
//!
//! Authenticates with an API key + secret key pair over HTTP Basic auth.
//! The v3.1 response has no boolean success flag: the adapter inspects the
//! first entry of the `Messages` result array and reports a normalized 200
//! when its status text is `"success"`, 400 otherwise.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::errors::{MailerError, MailerResult};
use crate::observability::{self, LogSink};
use crate::providers::Mailer;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{EmailAddress, Message, Response};

const DEFAULT_BASE_URL: &str = "https://api.mailjet.com";

/// Client for the Mailjet v3.1 send endpoint.
pub struct MailjetClient {
    api_key: SecretString,
    secret_key: SecretString,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    logger: Option<LogSink>,
}

#[derive(Serialize)]
struct WireAddress {
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl WireAddress {
    fn new(name: &str, address: &str) -> Self {
        Self {
            email: address.to_string(),
            name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
        }
    }

    fn from_email(address: &EmailAddress) -> Self {
        Self {
            email: address.address.clone(),
            name: address.name.clone(),
        }
    }
}

#[derive(Serialize)]
struct WireAttachment {
    #[serde(rename = "ContentType")]
    content_type: String,
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Base64Content")]
    base64_content: String,
}

#[derive(Serialize)]
struct WireMessage {
    #[serde(rename = "From")]
    from: WireAddress,
    #[serde(rename = "To")]
    to: Vec<WireAddress>,
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "TextPart", skip_serializing_if = "String::is_empty")]
    text_part: String,
    #[serde(rename = "HTMLPart", skip_serializing_if = "String::is_empty")]
    html_part: String,
    #[serde(rename = "Attachments", skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<WireAttachment>,
}

#[derive(Serialize)]
struct SendRequest {
    #[serde(rename = "Messages")]
    messages: Vec<WireMessage>,
}

#[derive(Deserialize)]
struct SendResult {
    #[serde(rename = "Status", default)]
    status: String,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(rename = "Messages", default)]
    messages: Vec<SendResult>,
}

impl MailjetClient {
    /// Creates a Mailjet client from an API key and secret key.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> MailerResult<Self> {
        Ok(Self {
            api_key: SecretString::new(api_key.into()),
            secret_key: SecretString::new(secret_key.into()),
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
        let credentials = format!(
            "{}:{}",
            self.api_key.expose_secret(),
            self.secret_key.expose_secret()
        );
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Basic {}", BASE64.encode(credentials)),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    async fn post(&self, request: &SendRequest) -> MailerResult<Response> {
        let body = serde_json::to_vec(request)?;
        let url = format!("{}/v3.1/send", self.base_url);

        let started = Instant::now();
        let http_response = self.transport.post(&url, &self.headers(), body).await?;
        tracing::debug!(
            target: "integrations_mailer",
            elapsed_ms = started.elapsed().as_millis() as u64,
            status_code = http_response.status_code,
            "mailjet send attempt finished"
        );

        if !http_response.is_success() {
            return Err(MailerError::SendFailure {
                response: http_response,
            });
        }

        let parsed: SendResponse = serde_json::from_str(&http_response.body)
            .map_err(|_| MailerError::empty_result("mailjet"))?;
        if parsed.messages.is_empty() {
            return Err(MailerError::empty_result("mailjet"));
        }

        // No boolean success flag: the first batch result's status text decides.
        let status_code = if parsed.messages[0].status == "success" {
            200
        } else {
            400
        };

        let response = Response {
            status_code,
            body: http_response.body,
            headers: http_response.headers,
        };

        if status_code != 200 {
            return Err(MailerError::SendFailure { response });
        }

        observability::emit(self.logger.as_ref(), &observability::send_log_line(&response));
        Ok(response)
    }
}

impl std::fmt::Debug for MailjetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailjetClient")
            .field("api_key", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Mailer for MailjetClient {
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
        let request = SendRequest {
            messages: vec![WireMessage {
                from: WireAddress::new(from_name, from_address),
                to: vec![WireAddress::new(to_name, to_address)],
                subject: subject.to_string(),
                text_part: text.to_string(),
                html_part: html.to_string(),
                attachments: Vec::new(),
            }],
        };
        self.post(&request).await
    }

    async fn send_message(&self, message: &Message) -> MailerResult<Response> {
        message.validate()?;

        let from = message
            .from
            .as_ref()
            .ok_or_else(|| MailerError::validation("missing from email address"))?;

        let request = SendRequest {
            messages: vec![WireMessage {
                from: WireAddress::from_email(from),
                to: message.to.iter().map(WireAddress::from_email).collect(),
                subject: message.subject.clone(),
                text_part: message.text.clone(),
                html_part: message.html.clone(),
                attachments: message
                    .attachments
                    .iter()
                    .map(|a| WireAttachment {
                        content_type: a.content_type.clone(),
                        filename: a.filename.clone(),
                        base64_content: a.content.clone(),
                    })
                    .collect(),
            }],
        };

        self.post(&request).await
    }
}
