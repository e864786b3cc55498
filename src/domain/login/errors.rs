//! Login throttling errors.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidEmail | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, Error)]
pub enum LoginThrottleError {
    #[error("請輸入有效的電子郵件地址")]
    InvalidEmail(#[source] ValidationError),

    #[error("Login attempt store failed: {0}")]
    Infrastructure(String),
}

impl LoginThrottleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LoginThrottleError::InvalidEmail(_) => ErrorCode::InvalidEmail,
            LoginThrottleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for LoginThrottleError {
    fn from(err: ValidationError) -> Self {
        LoginThrottleError::InvalidEmail(err)
    }
}

impl From<DomainError> for LoginThrottleError {
    fn from(err: DomainError) -> Self {
        LoginThrottleError::Infrastructure(err.to_string())
    }
}
