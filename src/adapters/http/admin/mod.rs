//! HTTP adapter for admin role management.

mod dto;
mod handlers;
mod routes;

pub use dto::{AdminCheckResponse, AdminRoleRequest, AdminRoleResponse};
pub use handlers::{AdminApiError, AdminHandlers};
pub use routes::admin_routes;
