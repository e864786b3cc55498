//! Mail adapters - Implementations of the `MailTransport` port.
//!
//! - `GmailMailTransport` - Gmail SMTP relay authenticated with OAuth2 (XOAUTH2)
//! - `MockMailTransport` - Records messages for tests

mod gmail;
mod mock;

pub use gmail::GmailMailTransport;
pub use mock::MockMailTransport;
