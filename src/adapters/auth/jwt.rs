//! HS256 JWT adapter for bearer-token validation.
//!
//! Access tokens are issued by the hosted auth provider and signed with a
//! shared secret. This adapter checks:
//! - **Signature**: HS256 with the configured secret
//! - **Audience (aud)**: Must match the configured audience
//! - **Expiry (exp)**: Must be in the future, within the configured leeway
//!
//! The `sub` claim becomes the domain `UserId`.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims read from an access token.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    /// Subject (user ID)
    sub: String,

    /// User's email address
    #[serde(default)]
    email: Option<String>,
}

/// Validates provider-issued access tokens.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    audience: String,
}

impl JwtSessionValidator {
    pub fn new(secret: &str, audience: impl Into<String>, leeway_secs: u64) -> Self {
        let audience = audience.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&audience]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        validation.leeway = leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            audience,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, &config.jwt_audience, config.leeway_secs)
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            },
        )?;
        let claims = data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid subject in token");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.email))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "a-test-secret-that-is-long-enough!!";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(SECRET, "authenticated", 0)
    }

    fn token(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let jwt = token(
            json!({"sub": "user-1", "aud": "authenticated", "exp": in_one_hour(), "email": "a@b.co"}),
            SECRET,
        );

        let user = validator().validate(&jwt).await.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.email.as_deref(), Some("a@b.co"));
    }

    #[tokio::test]
    async fn email_claim_is_optional() {
        let jwt = token(
            json!({"sub": "user-1", "aud": "authenticated", "exp": in_one_hour()}),
            SECRET,
        );
        assert_eq!(validator().validate(&jwt).await.unwrap().email, None);
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let jwt = token(
            json!({"sub": "user-1", "aud": "authenticated", "exp": chrono::Utc::now().timestamp() - 600}),
            SECRET,
        );
        assert_eq!(validator().validate(&jwt).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let jwt = token(
            json!({"sub": "user-1", "aud": "authenticated", "exp": in_one_hour()}),
            "some-other-secret-of-similar-length",
        );
        assert_eq!(validator().validate(&jwt).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let jwt = token(
            json!({"sub": "user-1", "aud": "anon", "exp": in_one_hour()}),
            SECRET,
        );
        assert_eq!(validator().validate(&jwt).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        assert_eq!(
            validator().validate("not.a.jwt").await,
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn debug_hides_key() {
        let debug = format!("{:?}", validator());
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("authenticated"));
    }
}
