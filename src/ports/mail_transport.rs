//! Outbound email port.
//!
//! Adapters deliver one fully rendered message per call. Retrying is not
//! part of the contract: a failure is reported once and the caller decides.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::EmailAddress;
use crate::domain::newsletter::RenderedEmail;

/// A message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: EmailAddress,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl OutgoingEmail {
    pub fn new(to: EmailAddress, rendered: RenderedEmail) -> Self {
        Self {
            to,
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    /// Access token could not be obtained.
    #[error("Mail authorization failed: {0}")]
    Authorization(String),

    /// The message could not be built (bad address, header, ...).
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// The mail server refused or the connection failed.
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
