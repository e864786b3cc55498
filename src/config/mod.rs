//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `QUILLHOUSE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use quillhouse::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod email;
mod error;
mod login_throttle;
mod newsletter;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use login_throttle::LoginThrottleConfig;
pub use newsletter::NewsletterConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, site URL)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT verification)
    pub auth: AuthConfig,

    /// Email configuration (Gmail OAuth2 + SMTP)
    pub email: EmailConfig,

    /// Failed-login throttling
    #[serde(default)]
    pub login_throttle: LoginThrottleConfig,

    /// Newsletter dispatch and link signing
    pub newsletter: NewsletterConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QUILLHOUSE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QUILLHOUSE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `QUILLHOUSE__DATABASE__URL=...` -> `database.url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUILLHOUSE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.email.validate()?;
        self.login_throttle.validate()?;
        self.newsletter.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const MINIMAL_ENV: &[(&str, &str)] = &[
        ("QUILLHOUSE__DATABASE__URL", "postgresql://test@localhost/test"),
        ("QUILLHOUSE__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef"),
        ("QUILLHOUSE__EMAIL__OAUTH_CLIENT_ID", "client-id"),
        ("QUILLHOUSE__EMAIL__OAUTH_CLIENT_SECRET", "client-secret"),
        ("QUILLHOUSE__EMAIL__OAUTH_REFRESH_TOKEN", "refresh-token"),
        ("QUILLHOUSE__EMAIL__FROM_EMAIL", "newsletter@example.com"),
        ("QUILLHOUSE__NEWSLETTER__LINK_SIGNING_SECRET", "fedcba9876543210fedcba9876543210"),
    ];

    const OPTIONAL_KEYS: &[&str] = &[
        "QUILLHOUSE__SERVER__PORT",
        "QUILLHOUSE__SERVER__ENVIRONMENT",
        "QUILLHOUSE__SERVER__SITE_URL",
        "QUILLHOUSE__LOGIN_THROTTLE__MAX_FAILED_ATTEMPTS",
    ];

    fn set_minimal_env() {
        for (key, value) in MINIMAL_ENV {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in MINIMAL_ENV {
            env::remove_var(key);
        }
        for key in OPTIONAL_KEYS {
            env::remove_var(key);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.email.from_email, "newsletter@example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.auth.jwt_audience, "authenticated");
        assert_eq!(config.login_throttle.window_minutes, 15);
        assert_eq!(config.login_throttle.max_failed_attempts, 5);
        assert_eq!(config.newsletter.send_delay_ms, 100);
    }

    #[test]
    fn test_overrides() {
        let config = load_with(&[
            ("QUILLHOUSE__SERVER__PORT", "3000"),
            ("QUILLHOUSE__SERVER__ENVIRONMENT", "production"),
            ("QUILLHOUSE__SERVER__SITE_URL", "https://blog.example.com"),
            ("QUILLHOUSE__LOGIN_THROTTLE__MAX_FAILED_ATTEMPTS", "3"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.login_throttle.max_failed_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_http_site_url() {
        let config = load_with(&[("QUILLHOUSE__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.validate().is_err());
    }
}
