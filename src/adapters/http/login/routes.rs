//! HTTP routes for `/api/auth`.

use axum::{routing::post, Router};

use super::handlers::{
    check_password_strength, check_rate_limit, record_login_attempt, LoginHandlers,
};

pub fn login_routes(handlers: LoginHandlers) -> Router {
    Router::new()
        .route("/check-rate-limit", post(check_rate_limit))
        .route("/record-login-attempt", post(record_login_attempt))
        .route("/password-strength", post(check_password_strength))
        .with_state(handlers)
}
