//! Failed-login throttling policy.
//!
//! A fixed trailing window is applied per email address. The decision is a
//! pure function of the failed-attempt timestamps inside that window, so it
//! can be evaluated and tested without a database.

use chrono::Duration;

use crate::domain::foundation::Timestamp;

/// Window and threshold applied to failed login attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    window: Duration,
    max_failed_attempts: u32,
}

impl ThrottlePolicy {
    pub const DEFAULT_WINDOW_MINUTES: i64 = 15;
    pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 5;

    pub fn new(window: Duration, max_failed_attempts: u32) -> Self {
        Self {
            window,
            max_failed_attempts: max_failed_attempts.max(1),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_failed_attempts(&self) -> u32 {
        self.max_failed_attempts
    }

    /// Earliest instant still counted at `now` (exclusive).
    pub fn window_start(&self, now: Timestamp) -> Timestamp {
        now.minus(self.window)
    }

    /// Decides whether another login may be attempted.
    ///
    /// `failed_attempts` may contain timestamps outside the window; those
    /// are ignored.
    pub fn evaluate(&self, failed_attempts: &[Timestamp], now: Timestamp) -> ThrottleDecision {
        let window_start = self.window_start(now);
        let in_window: Vec<Timestamp> = failed_attempts
            .iter()
            .copied()
            .filter(|at| at.is_after(&window_start))
            .collect();

        let count = in_window.len() as u32;
        if count < self.max_failed_attempts {
            return ThrottleDecision::Allowed {
                remaining_attempts: self.max_failed_attempts - count,
            };
        }

        // count >= max_failed_attempts >= 1, so min() is Some
        let oldest = in_window.iter().min().copied().unwrap_or(now);
        let retry_after = oldest.plus(self.window);
        let seconds_left = retry_after.duration_since(&now).num_seconds().max(0);
        let minutes_remaining = ((seconds_left + 59) / 60).max(1) as u32;

        ThrottleDecision::Denied {
            failed_attempts: count,
            retry_after,
            minutes_remaining,
        }
    }

    /// Decision reported when the attempt store cannot be read.
    pub fn fail_open(&self) -> ThrottleDecision {
        ThrottleDecision::Allowed {
            remaining_attempts: self.max_failed_attempts,
        }
    }
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self::new(
            Duration::minutes(Self::DEFAULT_WINDOW_MINUTES),
            Self::DEFAULT_MAX_FAILED_ATTEMPTS,
        )
    }
}

/// Outcome of a throttle check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrottleDecision {
    Allowed {
        remaining_attempts: u32,
    },
    Denied {
        failed_attempts: u32,
        retry_after: Timestamp,
        minutes_remaining: u32,
    },
}

impl ThrottleDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ThrottleDecision::Allowed { .. })
    }

    /// User-facing explanation for a denial.
    pub fn denial_message(&self) -> Option<String> {
        match self {
            ThrottleDecision::Allowed { .. } => None,
            ThrottleDecision::Denied {
                minutes_remaining, ..
            } => Some(format!(
                "登入嘗試次數過多，請於 {} 分鐘後再試",
                minutes_remaining
            )),
        }
    }
}
