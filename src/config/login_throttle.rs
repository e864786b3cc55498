//! Login throttling configuration

use serde::Deserialize;

use crate::domain::login::ThrottlePolicy;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginThrottleConfig {
    /// Trailing window in which failures are counted
    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,

    /// Failures inside the window that trigger a lockout
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,
}

impl LoginThrottleConfig {
    pub fn policy(&self) -> ThrottlePolicy {
        ThrottlePolicy::new(
            chrono::Duration::minutes(self.window_minutes),
            self.max_failed_attempts,
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=1440).contains(&self.window_minutes) {
            return Err(ValidationError::InvalidThrottleWindow);
        }
        if self.max_failed_attempts == 0 {
            return Err(ValidationError::InvalidThrottleThreshold);
        }
        Ok(())
    }
}

impl Default for LoginThrottleConfig {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            max_failed_attempts: default_max_failed_attempts(),
        }
    }
}

fn default_window_minutes() -> i64 {
    ThrottlePolicy::DEFAULT_WINDOW_MINUTES
}

fn default_max_failed_attempts() -> u32 {
    ThrottlePolicy::DEFAULT_MAX_FAILED_ATTEMPTS
}
