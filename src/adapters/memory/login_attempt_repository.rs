//! In-memory login attempt ledger.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EmailAddress, Timestamp};
use crate::domain::login::LoginAttempt;
use crate::ports::LoginAttemptRepository;

/// Stores attempts in a vector. `set_unavailable(true)` makes every call
/// fail, which lets tests exercise storage outages.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoginAttemptRepository {
    attempts: Arc<RwLock<Vec<LoginAttempt>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryLoginAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn all(&self) -> Vec<LoginAttempt> {
        self.attempts.read().await.clone()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("login_attempts unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl LoginAttemptRepository for InMemoryLoginAttemptRepository {
    async fn insert(&self, attempt: &LoginAttempt) -> Result<(), DomainError> {
        self.check_available()?;
        self.attempts.write().await.push(attempt.clone());
        Ok(())
    }

    async fn failed_since(
        &self,
        email: &EmailAddress,
        since: Timestamp,
    ) -> Result<Vec<Timestamp>, DomainError> {
        self.check_available()?;
        let attempts = self.attempts.read().await;
        let mut failed: Vec<Timestamp> = attempts
            .iter()
            .filter(|a| &a.email == email && !a.success && a.attempted_at.is_after(&since))
            .map(|a| a.attempted_at)
            .collect();
        failed.sort();
        Ok(failed)
    }

    async fn delete_failed_since(
        &self,
        email: &EmailAddress,
        since: Timestamp,
    ) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|a| !(&a.email == email && !a.success && a.attempted_at.is_after(&since)));
        Ok((before - attempts.len()) as u64)
    }
}
