//! Provider adapters and the uniform send contract.
//!
//! Each adapter translates the canonical [`Message`](crate::types::Message)
//! into one provider's native request shape, issues the call, and normalizes
//! the result into a common [`Response`](crate::types::Response). Success
//! semantics are provider-specific and live in each adapter.

pub mod mailersend;
pub mod mailjet;
pub mod mailtrap;
pub mod sendgrid;
pub mod smtp2go;

use async_trait::async_trait;

use crate::errors::MailerResult;
use crate::types::{Message, Response};

pub use mailersend::MailerSendClient;
pub use mailjet::MailjetClient;
pub use mailtrap::MailtrapClient;
pub use sendgrid::SendGridClient;
pub use smtp2go::Smtp2goClient;

/// The uniform send contract every provider adapter satisfies.
///
/// Callers program against this trait and swap providers by constructing a
/// different adapter; call sites do not change.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Simplified single-recipient send that bypasses the builder.
    ///
    /// Adapters construct a minimal provider-native request internally;
    /// provider-specific field mapping rules apply.
    #[allow(clippy::too_many_arguments)]
    async fn send_mail(
        &self,
        from_name: &str,
        from_address: &str,
        to_name: &str,
        to_address: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> MailerResult<Response>;

    /// General entry point: validates the message, translates it into the
    /// provider's wire shape, and sends it.
    ///
    /// Validation runs even for messages built via the builder, as a guard
    /// against callers assembling a [`Message`] directly.
    async fn send_message(&self, message: &Message) -> MailerResult<Response>;
}
