//! Accounts: site profiles, admin roles, and password strength hints.

mod errors;
pub mod password_strength;
mod profile;

pub use errors::AdminError;
pub use password_strength::{PasswordStrength, StrengthLevel};
pub use profile::Profile;
