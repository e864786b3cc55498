//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Gmail SMTP with OAuth2 refresh token)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// OAuth2 client ID
    pub oauth_client_id: String,

    /// OAuth2 client secret
    pub oauth_client_secret: String,

    /// Long-lived refresh token for the sending mailbox
    pub oauth_refresh_token: String,

    /// Token endpoint used to exchange the refresh token
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    /// From email address (the authorized mailbox)
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// SMTP relay host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP port (STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.oauth_client_id.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__OAUTH_CLIENT_ID"));
        }
        if self.oauth_client_secret.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__OAUTH_CLIENT_SECRET"));
        }
        if self.oauth_refresh_token.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__OAUTH_REFRESH_TOKEN"));
        }
        if !self.token_endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidTokenEndpoint);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if self.smtp_host.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__SMTP_HOST"));
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            oauth_client_id: String::new(),
            oauth_client_secret: String::new(),
            oauth_refresh_token: String::new(),
            token_endpoint: default_token_endpoint(),
            from_email: String::new(),
            from_name: default_from_name(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
        }
    }
}

fn default_token_endpoint() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_from_name() -> String {
    "Quillhouse".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}
