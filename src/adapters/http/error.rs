//! JSON error body shared by every HTTP module.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::ErrorCode;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "Internal server error")
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let body = serde_json::to_value(ErrorResponse::new(ErrorCode::PostNotFound, "gone")).unwrap();
        assert_eq!(body["errorCode"], "POST_NOT_FOUND");
        assert_eq!(body["message"], "gone");
    }

    #[test]
    fn internal_hides_details() {
        let body = ErrorResponse::internal();
        assert_eq!(body.error_code, "INTERNAL_ERROR");
        assert_eq!(body.message, "Internal server error");
    }
}
