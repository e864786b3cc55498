//! Login throttling handlers.
//!
//! ## Commands
//! - Recording a sign-in attempt
//!
//! ## Queries
//! - Checking whether another attempt is allowed

mod check_rate_limit;
mod record_login_attempt;

pub use check_rate_limit::{CheckRateLimitHandler, CheckRateLimitQuery};
pub use record_login_attempt::{RecordLoginAttemptCommand, RecordLoginAttemptHandler};
