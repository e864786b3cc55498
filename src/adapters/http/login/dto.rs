//! HTTP DTOs for login throttling and password strength.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::login::ThrottleDecision;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CheckRateLimitRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordLoginAttemptRequest {
    pub email: String,
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordStrengthRequest {
    pub password: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Throttle check result.
///
/// Allowed responses carry `remainingAttempts`; denials carry the rest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&ThrottleDecision> for RateLimitResponse {
    fn from(decision: &ThrottleDecision) -> Self {
        match decision {
            ThrottleDecision::Allowed { remaining_attempts } => Self {
                allowed: true,
                error_code: None,
                remaining_attempts: Some(*remaining_attempts),
                retry_after: None,
                minutes_remaining: None,
                message: None,
            },
            ThrottleDecision::Denied {
                retry_after,
                minutes_remaining,
                ..
            } => Self {
                allowed: false,
                error_code: Some(ErrorCode::RateLimited.to_string()),
                remaining_attempts: None,
                retry_after: Some(retry_after.to_rfc3339()),
                minutes_remaining: Some(*minutes_remaining),
                message: decision.denial_message(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
