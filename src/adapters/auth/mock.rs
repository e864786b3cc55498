//! Mock session validator for testing.
//!
//! ```ignore
//! let validator = MockSessionValidator::new().with_test_user("valid-token", "user-123");
//! let user = validator.validate("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Maps fixed tokens to users. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a token for a user with the given ID and a derived email.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).unwrap(),
            Some(format!("{}@test.example.com", user_id)),
        );
        self.with_user(token, user)
    }

    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves_user() {
        let validator = MockSessionValidator::new().with_test_user("t", "user-1");
        let user = validator.validate("t").await.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.email.as_deref(), Some("user-1@test.example.com"));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert_eq!(validator.validate("nope").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_user("t", "user-1")
            .with_error(AuthError::TokenExpired);
        assert_eq!(validator.validate("t").await, Err(AuthError::TokenExpired));
    }
}
