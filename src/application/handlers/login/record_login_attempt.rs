//! RecordLoginAttemptHandler - Command handler appending to the login ledger.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::foundation::{EmailAddress, Timestamp};
use crate::domain::login::{LoginAttempt, LoginThrottleError, ThrottlePolicy};
use crate::ports::LoginAttemptRepository;

/// Command reporting the outcome of one sign-in.
#[derive(Debug, Clone)]
pub struct RecordLoginAttemptCommand {
    pub email: String,
    pub success: bool,
    pub ip_address: Option<String>,
}

/// Handler for recording login attempts.
///
/// A successful sign-in clears the failures inside the current window so
/// the user starts over with a full quota.
pub struct RecordLoginAttemptHandler {
    attempts: Arc<dyn LoginAttemptRepository>,
    policy: ThrottlePolicy,
}

impl RecordLoginAttemptHandler {
    pub fn new(attempts: Arc<dyn LoginAttemptRepository>, policy: ThrottlePolicy) -> Self {
        Self { attempts, policy }
    }

    pub async fn handle(&self, cmd: RecordLoginAttemptCommand) -> Result<(), LoginThrottleError> {
        let email = EmailAddress::parse(&cmd.email)?;
        let attempt = LoginAttempt::record(email.clone(), cmd.success, cmd.ip_address);

        self.attempts.insert(&attempt).await.map_err(|e| {
            error!(email = %email, error = %e, "Failed to record login attempt");
            LoginThrottleError::from(e)
        })?;

        if cmd.success {
            let since = self.policy.window_start(Timestamp::now());
            match self.attempts.delete_failed_since(&email, since).await {
                Ok(cleared) if cleared > 0 => {
                    info!(email = %email, cleared, "Cleared failed login attempts");
                }
                Ok(_) => {}
                Err(e) => {
                    // The attempt itself is stored; only the purge is lost.
                    warn!(email = %email, error = %e, "Failed to clear login failures");
                }
            }
        }

        Ok(())
    }
}
