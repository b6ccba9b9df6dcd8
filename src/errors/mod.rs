//! Error types for the mailer client.
//!
//! Provides a compact error taxonomy shared by every provider adapter:
//! construction, validation, transport, and provider-reported failures.

use thiserror::Error;

use crate::types::Response;

/// Result type alias for mailer operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Error type for mailer client operations.
#[derive(Debug, Error)]
pub enum MailerError {
    /// The adapter or its HTTP client could not be created.
    #[error("construction error: {message}")]
    Construction {
        /// Error message describing the construction failure.
        message: String,
    },

    /// The message is missing a required field (sender, recipients, subject).
    ///
    /// Raised by [`MessageBuilder::build`](crate::types::MessageBuilder::build)
    /// and re-raised by every `send_message` before any network call.
    #[error("validation error: {message}")]
    Validation {
        /// Which required field is missing.
        message: String,
    },

    /// The underlying network call failed (timeout, connection failure,
    /// client error). Propagated unchanged to the caller.
    #[error("transport error: {message}")]
    Transport {
        /// Error message from the HTTP client.
        message: String,
    },

    /// The provider was reached but reported a non-success result.
    ///
    /// Carries the normalized [`Response`] so the caller can inspect
    /// status, body, and headers even on failure.
    #[error("send failed: status_code={}, body={}", .response.status_code, .response.body)]
    SendFailure {
        /// The normalized provider response.
        response: Response,
    },

    /// The provider returned no parseable result object at all.
    #[error("no results returned from {provider}")]
    EmptyResult {
        /// Name of the provider that returned nothing usable.
        provider: String,
    },

    /// Request or response (de)serialization failed.
    #[error("serialization error: {message}")]
    Serialization {
        /// Error message from the serializer.
        message: String,
    },
}

impl MailerError {
    /// Creates a construction error.
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an empty-result error for the named provider.
    pub fn empty_result(provider: impl Into<String>) -> Self {
        Self::EmptyResult {
            provider: provider.into(),
        }
    }

    /// Returns the normalized response attached to a send failure, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::SendFailure { response } => Some(response),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MailerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MailerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
