//! Admin role errors.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Forbidden | 403 |
//! | ProfileNotFound | 404 |
//! | AlreadyAdmin / NotAdmin | 409 |
//! | CannotRevokeSelf | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("Admin privileges required")]
    Forbidden,

    #[error("Profile not found: {0}")]
    ProfileNotFound(UserId),

    #[error("User {0} is already an admin")]
    AlreadyAdmin(UserId),

    #[error("User {0} is not an admin")]
    NotAdmin(UserId),

    #[error("You cannot revoke your own admin rights")]
    CannotRevokeSelf,

    #[error("Profile storage failed: {0}")]
    Infrastructure(String),
}

impl AdminError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AdminError::Forbidden => ErrorCode::Forbidden,
            AdminError::ProfileNotFound(_) => ErrorCode::ProfileNotFound,
            AdminError::AlreadyAdmin(_) | AdminError::NotAdmin(_) => ErrorCode::AlreadyExists,
            AdminError::CannotRevokeSelf => ErrorCode::ValidationFailed,
            AdminError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for AdminError {
    fn from(err: DomainError) -> Self {
        AdminError::Infrastructure(err.to_string())
    }
}
