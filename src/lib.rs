//! # Mailer Integration Library
//!
//! A production-ready multi-provider transactional email client:
//! - One canonical, validated [`Message`] with a fluent [`MessageBuilder`]
//! - A uniform two-operation send contract ([`Mailer`]) every provider
//!   adapter satisfies, so callers swap providers without touching call sites
//! - Adapters for SendGrid, MailerSend, Mailjet, Mailtrap (sandbox), and
//!   SMTP2GO (bulk relay), each preserving its provider's success semantics
//! - Results normalized into one [`Response`] shape regardless of provider
//!
//! Sends are fire-and-forget: one awaited HTTP round trip per call with a
//! fixed 10-second transport timeout, no internal retries, no queues.
//! Retry policy belongs to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_mailer::{Mailer, MailtrapClient, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let message = Message::builder()
//!         .from("Sender", "sender@example.com")
//!         .recipient("Recipient", "recipient@example.com")
//!         .subject("Hello from Rust!")
//!         .text("This is a test email.")
//!         .build()?;
//!
//!     let client = MailtrapClient::new("api-token")?;
//!     let response = client.send_message(&message).await?;
//!     println!("sent: status={}", response.status_code);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Core modules
pub mod errors;
pub mod types;

// Transport layer
pub mod transport;

// Observability
pub mod observability;

// Provider adapters
pub mod providers;

// Re-exports for convenience
pub use errors::{MailerError, MailerResult};
pub use observability::LogSink;
pub use providers::{
    Mailer, MailerSendClient, MailjetClient, MailtrapClient, SendGridClient, Smtp2goClient,
};
pub use transport::{HttpTransport, ReqwestTransport, SEND_TIMEOUT};
pub use types::{Attachment, EmailAddress, Message, MessageBuilder, Response};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
