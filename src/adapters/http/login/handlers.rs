//! HTTP handlers for login throttling and password strength.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::ClientIp;
use crate::application::handlers::login::{
    CheckRateLimitHandler, CheckRateLimitQuery, RecordLoginAttemptCommand,
    RecordLoginAttemptHandler,
};
use crate::domain::account::password_strength;
use crate::domain::foundation::Timestamp;
use crate::domain::login::{LoginThrottleError, ThrottleDecision};

use super::dto::{
    CheckRateLimitRequest, PasswordStrengthRequest, RateLimitResponse,
    RecordLoginAttemptRequest, SuccessResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LoginHandlers {
    check_handler: Arc<CheckRateLimitHandler>,
    record_handler: Arc<RecordLoginAttemptHandler>,
}

impl LoginHandlers {
    pub fn new(
        check_handler: Arc<CheckRateLimitHandler>,
        record_handler: Arc<RecordLoginAttemptHandler>,
    ) -> Self {
        Self {
            check_handler,
            record_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/check-rate-limit
pub async fn check_rate_limit(
    State(handlers): State<LoginHandlers>,
    Json(req): Json<CheckRateLimitRequest>,
) -> Result<Response, LoginApiError> {
    let decision = handlers
        .check_handler
        .handle(CheckRateLimitQuery { email: req.email })
        .await?;

    let body = Json(RateLimitResponse::from(&decision));
    let response = match &decision {
        ThrottleDecision::Allowed { .. } => (StatusCode::OK, body).into_response(),
        ThrottleDecision::Denied { retry_after, .. } => {
            let secs = retry_after
                .duration_since(&Timestamp::now())
                .num_seconds()
                .max(1);
            let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    };
    Ok(response)
}

/// POST /api/auth/record-login-attempt
pub async fn record_login_attempt(
    State(handlers): State<LoginHandlers>,
    ClientIp(ip_address): ClientIp,
    Json(req): Json<RecordLoginAttemptRequest>,
) -> Result<Json<SuccessResponse>, LoginApiError> {
    handlers
        .record_handler
        .handle(RecordLoginAttemptCommand {
            email: req.email,
            success: req.success,
            ip_address,
        })
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/auth/password-strength
pub async fn check_password_strength(Json(req): Json<PasswordStrengthRequest>) -> Response {
    Json(password_strength::evaluate(&req.password)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Maps `LoginThrottleError` to an HTTP response.
#[derive(Debug)]
pub struct LoginApiError(pub LoginThrottleError);

impl From<LoginThrottleError> for LoginApiError {
    fn from(err: LoginThrottleError) -> Self {
        Self(err)
    }
}

impl IntoResponse for LoginApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            LoginThrottleError::InvalidEmail(_) => {
                ErrorResponse::new(self.0.code(), self.0.to_string())
                    .into_response_with(StatusCode::BAD_REQUEST)
            }
            LoginThrottleError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "Login attempt request failed");
                ErrorResponse::internal().into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn invalid_email_maps_to_400() {
        let err = LoginApiError(LoginThrottleError::InvalidEmail(
            ValidationError::empty_field("email"),
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let err = LoginApiError(LoginThrottleError::Infrastructure("down".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
