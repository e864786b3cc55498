//! Mock mail transport for testing.
//!
//! Records every message it is asked to send. Individual recipients can be
//! configured to fail so callers can exercise partial-failure paths.
//!
//! # Example
//!
//! ```ignore
//! let mail = MockMailTransport::new().failing_for("bounce@example.com");
//! mail.send(&email).await?;
//! assert_eq!(mail.sent().len(), 1);
//! ```

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::ports::{MailError, MailTransport, OutgoingEmail};

#[derive(Debug, Default)]
pub struct MockMailTransport {
    sent: RwLock<Vec<OutgoingEmail>>,
    failing_recipients: RwLock<HashSet<String>>,
    force_error: RwLock<Option<MailError>>,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries to `email` fail with `MailError::Delivery`.
    pub fn failing_for(self, email: impl Into<String>) -> Self {
        self.failing_recipients
            .write()
            .unwrap()
            .insert(email.into().to_lowercase());
        self
    }

    /// Every delivery fails with `error`.
    pub fn with_error(self, error: MailError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Messages accepted so far, in order.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.read().unwrap().clone()
    }

    pub fn sent_to(&self) -> Vec<String> {
        self.sent
            .read()
            .unwrap()
            .iter()
            .map(|m| m.to.to_string())
            .collect()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if let Some(err) = self.force_error.read().unwrap().clone() {
            return Err(err);
        }
        if self
            .failing_recipients
            .read()
            .unwrap()
            .contains(email.to.as_str())
        {
            return Err(MailError::Delivery(format!("mailbox {} unavailable", email.to)));
        }
        self.sent.write().unwrap().push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EmailAddress;

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: EmailAddress::parse(to).unwrap(),
            subject: "Hi".into(),
            html: "<p>Hi</p>".into(),
            text: "Hi".into(),
        }
    }

    #[tokio::test]
    async fn records_successful_sends() {
        let mail = MockMailTransport::new();
        mail.send(&email("a@x.io")).await.unwrap();
        assert_eq!(mail.sent_to(), vec!["a@x.io".to_string()]);
    }

    #[tokio::test]
    async fn failing_recipient_is_not_recorded() {
        let mail = MockMailTransport::new().failing_for("Bounce@x.io");
        assert!(matches!(
            mail.send(&email("bounce@x.io")).await,
            Err(MailError::Delivery(_))
        ));
        assert!(mail.sent().is_empty());
    }

    #[tokio::test]
    async fn forced_error_applies_to_everyone() {
        let mail = MockMailTransport::new().with_error(MailError::Authorization("expired".into()));
        assert_eq!(
            mail.send(&email("a@x.io")).await,
            Err(MailError::Authorization("expired".into()))
        );
    }
}
