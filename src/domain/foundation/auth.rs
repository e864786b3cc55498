//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the rest of the crate sees after a bearer
//! token has been validated by a `SessionValidator` adapter. It carries no
//! provider-specific claims.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject of the token, i.e. the hosted auth provider's user id.
    pub id: UserId,

    /// Email claim, when the provider includes one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The token is valid but the caller may not perform this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The authentication backend could not be consulted.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_new_creates_user() {
        let user = AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            Some("test@example.com".to_string()),
        );

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email.as_deref(), Some("test@example.com"));
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(format!("{}", err), "Auth service unavailable: Connection refused");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }
}
