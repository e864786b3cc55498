//! Newsletter configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum link signing secret length accepted in production
pub const MIN_LINK_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct NewsletterConfig {
    /// Pause between two consecutive sends, in milliseconds
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,

    /// HMAC key for tracked click links
    pub link_signing_secret: String,
}

impl NewsletterConfig {
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.send_delay_ms > 10_000 {
            return Err(ValidationError::SendDelayTooLarge);
        }
        if self.link_signing_secret.is_empty() {
            return Err(ValidationError::MissingRequired("NEWSLETTER__LINK_SIGNING_SECRET"));
        }
        if *environment == Environment::Production
            && self.link_signing_secret.len() < MIN_LINK_SECRET_LEN
        {
            return Err(ValidationError::LinkSecretTooShort(MIN_LINK_SECRET_LEN));
        }
        Ok(())
    }
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: default_send_delay_ms(),
            link_signing_secret: String::new(),
        }
    }
}

fn default_send_delay_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delay_is_100ms() {
        assert_eq!(
            NewsletterConfig::default().send_delay(),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_validation() {
        let env = Environment::Development;
        assert!(NewsletterConfig::default().validate(&env).is_err());

        let config = NewsletterConfig {
            link_signing_secret: "dev".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&env).is_ok());
        assert!(config.validate(&Environment::Production).is_err());

        let config = NewsletterConfig {
            send_delay_ms: 60_000,
            link_signing_secret: "dev".to_string(),
        };
        assert!(config.validate(&env).is_err());
    }
}
