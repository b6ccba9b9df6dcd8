//! Core types for the mailer client.
//!
//! This module provides:
//! - Email addresses with optional display names
//! - Base64-encoded attachments
//! - The canonical [`Message`] envelope and its fluent [`MessageBuilder`]
//! - The normalized [`Response`] returned by every provider adapter

use std::collections::HashMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{MailerError, MailerResult};

/// Default content disposition for attachments.
pub const DEFAULT_DISPOSITION: &str = "attachment";

fn default_disposition() -> String {
    DEFAULT_DISPOSITION.to_string()
}

/// Email address with optional display name.
///
/// Used for both the sender and each recipient. Serializes to the
/// `{"name": ..., "email": ...}` wire shape with `name` omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Display name (e.g., "John Doe").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address (e.g., "john@example.com").
    #[serde(rename = "email")]
    pub address: String,
}

impl EmailAddress {
    /// Creates an address with no display name.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            name: None,
            address: address.into(),
        }
    }

    /// Creates an address with a display name; an empty name is treated as absent.
    pub fn with_name(name: impl Into<String>, address: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: if name.is_empty() { None } else { Some(name) },
            address: address.into(),
        }
    }

    /// Formats the address as a single mailbox string (`Name <addr>`).
    ///
    /// Used by providers that take recipients as strings rather than objects.
    pub fn to_mailbox(&self) -> String {
        match &self.name {
            Some(name) => format!("{} <{}>", name, self.address),
            None => self.address.clone(),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_mailbox())
    }
}

/// File attachment with base64-encoded content.
///
/// No size or content validation is performed beyond field presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// MIME content type.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Filename shown to the recipient.
    pub filename: String,
    /// Base64-encoded content.
    pub content: String,
    /// Content disposition; `"attachment"` unless set otherwise.
    #[serde(default = "default_disposition")]
    pub disposition: String,
}

impl Attachment {
    /// Creates an attachment from already base64-encoded content.
    pub fn new(
        content_type: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            filename: filename.into(),
            content: content.into(),
            disposition: default_disposition(),
        }
    }

    /// Creates an attachment from raw bytes, encoding them as base64.
    pub fn from_bytes(
        content_type: impl Into<String>,
        filename: impl Into<String>,
        data: &[u8],
    ) -> Self {
        Self::new(content_type, filename, BASE64.encode(data))
    }

    /// Creates an attachment from raw bytes with the content type guessed
    /// from the filename.
    pub fn from_file_bytes(filename: impl Into<String>, data: &[u8]) -> Self {
        let filename = filename.into();
        let content_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string();
        Self::from_bytes(content_type, filename, data)
    }

    /// Sets the content disposition to inline.
    pub fn inline(mut self) -> Self {
        self.disposition = "inline".to_string();
        self
    }
}

/// Canonical email message, independent of any provider.
///
/// Fields are public so callers may assemble a `Message` directly; adapters
/// re-validate with [`Message::validate`] before dispatch either way. The
/// serde shape is the sandbox provider's wire format: `from`, `to`,
/// `subject`, `text`, `html`, `attachments`, with empty fields omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Sender address. `None` models "never set".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<EmailAddress>,
    /// Recipients, in the order they were added.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<EmailAddress>,
    /// Subject line.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    /// Plain text body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// HTML body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html: String,
    /// File attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Creates a new message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Checks the message invariants in order: sender present, at least
    /// one recipient, non-empty subject.
    pub fn validate(&self) -> MailerResult<()> {
        if self.from.is_none() {
            return Err(MailerError::validation("missing from email address"));
        }
        if self.to.is_empty() {
            return Err(MailerError::validation("missing recipient(s) address"));
        }
        if self.subject.is_empty() {
            return Err(MailerError::validation("missing subject"));
        }
        Ok(())
    }

    /// Returns the first recipient, the delivery target for providers that
    /// only accept a single one.
    pub fn primary_recipient(&self) -> Option<&EmailAddress> {
        self.to.first()
    }

    /// Returns true if the message has any attachments.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Fluent builder for [`Message`].
///
/// Every method takes the builder by value and returns it, so a chain keeps
/// ownership with the single caller holding the builder. `build` consumes
/// the builder: one builder produces at most one message.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender. Ignored when the address is blank or whitespace-only,
    /// matching the build-time rule that treats "never set" and "set to
    /// blank" identically.
    pub fn from(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        if address.trim().is_empty() {
            return self;
        }
        self.message.from = Some(EmailAddress::with_name(name, address));
        self
    }

    /// Appends a recipient, preserving call order. Ignored when the address
    /// is blank or whitespace-only.
    pub fn recipient(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        if address.trim().is_empty() {
            return self;
        }
        self.message.to.push(EmailAddress::with_name(name, address));
        self
    }

    /// Sets the subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.message.subject = subject.into();
        self
    }

    /// Sets the plain text body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.message.text = text.into();
        self
    }

    /// Sets the HTML body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.message.html = html.into();
        self
    }

    /// Appends an attachment with the default `"attachment"` disposition.
    pub fn attachment(
        self,
        content_type: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.attach(Attachment::new(content_type, filename, content))
    }

    /// Appends an attachment with an explicit disposition.
    pub fn attachment_with_disposition(
        self,
        content_type: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<String>,
        disposition: impl Into<String>,
    ) -> Self {
        let mut attachment = Attachment::new(content_type, filename, content);
        attachment.disposition = disposition.into();
        self.attach(attachment)
    }

    /// Appends a prebuilt attachment.
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.message.attachments.push(attachment);
        self
    }

    /// Validates and returns the accumulated message.
    ///
    /// Fails with a [`MailerError::Validation`] naming the first missing
    /// required field, checked sender, then recipients, then subject.
    pub fn build(self) -> MailerResult<Message> {
        self.message.validate()?;
        Ok(self.message)
    }
}

/// Normalized result of a provider API call.
///
/// Every adapter maps its provider's native response into this shape, so
/// callers can swap providers without touching result handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// HTTP-style status code (e.g. 200).
    pub status_code: u16,
    /// Raw response body (e.g. `{"result": "success"}`).
    pub body: String,
    /// Response headers (e.g. `X-Ratelimit-Limit: [600]`).
    pub headers: HashMap<String, Vec<String>>,
}

impl Response {
    /// Returns true for a status in `[200, 300)`.
    ///
    /// Individual providers may apply stricter rules (the sandbox provider
    /// accepts exactly 200).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
