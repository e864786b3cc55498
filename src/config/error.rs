//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid site URL: {0}")]
    InvalidSiteUrl(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool sizes must satisfy 0 < min <= max")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed ({0})")]
    PoolSizeTooLarge(u32),

    #[error("JWT secret must be at least {0} characters")]
    JwtSecretTooShort(usize),

    #[error("Invalid sender email address")]
    InvalidFromEmail,

    #[error("Invalid OAuth token endpoint")]
    InvalidTokenEndpoint,

    #[error("Login throttle window must be between 1 and 1440 minutes")]
    InvalidThrottleWindow,

    #[error("Login throttle threshold must be at least 1")]
    InvalidThrottleThreshold,

    #[error("Newsletter send delay exceeds 10 seconds")]
    SendDelayTooLarge,

    #[error("Link signing secret must be at least {0} characters")]
    LinkSecretTooShort(usize),
}
