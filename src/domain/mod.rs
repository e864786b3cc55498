//! Domain layer containing business rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, email, errors, auth)
//! - `login` - Failed-login records and the throttling policy
//! - `newsletter` - Subscribers, tracking records, email rendering
//! - `account` - Profiles, admin roles, password strength

pub mod account;
pub mod foundation;
pub mod login;
pub mod newsletter;
