//! Login throttling: failed-attempt records and the windowed policy that
//! decides whether another sign-in may be tried.

mod attempt;
mod errors;
mod policy;

pub use attempt::LoginAttempt;
pub use errors::LoginThrottleError;
pub use policy::{ThrottleDecision, ThrottlePolicy};
