//! CheckRateLimitHandler - Query handler deciding whether a sign-in may be
//! attempted for an email address.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{EmailAddress, Timestamp};
use crate::domain::login::{LoginThrottleError, ThrottleDecision, ThrottlePolicy};
use crate::ports::LoginAttemptRepository;

/// Query for the current throttle state of an email.
#[derive(Debug, Clone)]
pub struct CheckRateLimitQuery {
    pub email: String,
}

/// Handler for rate-limit checks.
///
/// Storage failures fail open: the caller is allowed with a full quota and
/// the failure is logged.
pub struct CheckRateLimitHandler {
    attempts: Arc<dyn LoginAttemptRepository>,
    policy: ThrottlePolicy,
}

impl CheckRateLimitHandler {
    pub fn new(attempts: Arc<dyn LoginAttemptRepository>, policy: ThrottlePolicy) -> Self {
        Self { attempts, policy }
    }

    pub async fn handle(
        &self,
        query: CheckRateLimitQuery,
    ) -> Result<ThrottleDecision, LoginThrottleError> {
        let email = EmailAddress::parse(&query.email)?;
        Ok(self.check_at(&email, Timestamp::now()).await)
    }

    async fn check_at(&self, email: &EmailAddress, now: Timestamp) -> ThrottleDecision {
        let since = self.policy.window_start(now);
        match self.attempts.failed_since(email, since).await {
            Ok(failed) => self.policy.evaluate(&failed, now),
            Err(e) => {
                warn!(email = %email, error = %e, "Login attempt lookup failed, allowing request");
                self.policy.fail_open()
            }
        }
    }
}
