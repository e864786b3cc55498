//! LoginAttemptRepository port for the failed-login ledger.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailAddress, Timestamp};
use crate::domain::login::LoginAttempt;

/// Append-mostly store of login attempts keyed by email address.
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
    /// Persist one attempt.
    async fn insert(&self, attempt: &LoginAttempt) -> Result<(), DomainError>;

    /// Timestamps of failed attempts for `email` strictly after `since`.
    async fn failed_since(
        &self,
        email: &EmailAddress,
        since: Timestamp,
    ) -> Result<Vec<Timestamp>, DomainError>;

    /// Remove failed attempts for `email` strictly after `since`.
    ///
    /// Returns the number of rows removed.
    async fn delete_failed_since(
        &self,
        email: &EmailAddress,
        since: Timestamp,
    ) -> Result<u64, DomainError>;
}
