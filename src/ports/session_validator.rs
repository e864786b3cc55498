//! Session validation port for bearer tokens issued by the hosted auth
//! provider.
//!
//! Implementations must check signature, audience and expiry, returning
//! `AuthError::TokenExpired` for expired tokens and `AuthError::InvalidToken`
//! for everything else that fails verification.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw JWT (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
