//! Admin role handlers.
//!
//! ## Commands
//! - Granting and revoking the admin flag (admin only)
//!
//! ## Queries
//! - Checking whether the caller is an admin

mod check_admin;
mod grant_admin;
mod require_admin;
mod revoke_admin;

pub use check_admin::{CheckAdminHandler, CheckAdminQuery};
pub use grant_admin::{GrantAdminCommand, GrantAdminHandler};
pub use require_admin::AdminGuard;
pub use revoke_admin::{RevokeAdminCommand, RevokeAdminHandler};
