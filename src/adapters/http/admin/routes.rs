//! HTTP routes for `/api/admin`.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{check_admin, grant_admin, revoke_admin, AdminHandlers};

pub fn admin_routes(handlers: AdminHandlers) -> Router {
    Router::new()
        .route("/check", get(check_admin))
        .route("/grant", post(grant_admin))
        .route("/revoke", post(revoke_admin))
        .with_state(handlers)
}
