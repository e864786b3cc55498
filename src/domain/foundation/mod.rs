//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types used by every
//! feature module.

mod auth;
mod email;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use email::EmailAddress;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EmailStatId, LoginAttemptId, PostId, SubscriberId, UserId};
pub use timestamp::Timestamp;
