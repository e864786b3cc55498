//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum JWT secret length accepted in production
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Authentication configuration (hosted provider, HS256 tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret the provider signs access tokens with
    pub jwt_secret: String,

    /// Expected `aud` claim
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,

    /// Allowed clock skew in seconds when checking `exp`
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Short secrets are tolerated outside production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"));
        }
        if *environment == Environment::Production && self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_LEN));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_audience: default_jwt_audience(),
            leeway_secs: default_leeway(),
        }
    }
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt_audience, "authenticated");
        assert_eq!(config.leeway_secs, 30);
    }

    #[test]
    fn test_validation_missing_secret() {
        assert!(AuthConfig::default()
            .validate(&Environment::Development)
            .is_err());
    }

    #[test]
    fn test_validation_production_requires_long_secret() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());

        let config = AuthConfig {
            jwt_secret: "x".repeat(MIN_JWT_SECRET_LEN),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
