//! Gmail mail transport.
//!
//! Sends through Gmail's SMTP relay with the XOAUTH2 mechanism. The access
//! token is minted from a long-lived OAuth2 refresh token. A pooled SMTP
//! transport authenticated with that token is cached until shortly before
//! the token expires, so a newsletter run refreshes and connects once.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::EmailConfig;
use crate::ports::{MailError, MailTransport, OutgoingEmail};

/// Refresh this long before the provider-reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Applied to token endpoint requests.
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

type SmtpMailer = AsyncSmtpTransport<Tokio1Executor>;

/// Transport bound to one access token.
struct CachedSession {
    mailer: SmtpMailer,
    refresh_after: Instant,
}

impl CachedSession {
    fn new(mailer: SmtpMailer, expires_in: u64, now: Instant) -> Self {
        let lifetime = Duration::from_secs(expires_in).saturating_sub(EXPIRY_MARGIN);
        Self {
            mailer,
            refresh_after: now + lifetime,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.refresh_after
    }
}

pub struct GmailMailTransport {
    http: reqwest::Client,
    token_endpoint: String,
    client_id: String,
    client_secret: SecretString,
    refresh_token: SecretString,
    sender: Mailbox,
    sender_login: String,
    smtp_host: String,
    smtp_port: u16,
    session: RwLock<Option<CachedSession>>,
}

impl GmailMailTransport {
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let sender: Mailbox = config
            .from_header()
            .parse()
            .map_err(|e| MailError::InvalidMessage(format!("invalid sender: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MailError::Authorization(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            token_endpoint: config.token_endpoint.clone(),
            client_id: config.oauth_client_id.clone(),
            client_secret: SecretString::new(config.oauth_client_secret.clone()),
            refresh_token: SecretString::new(config.oauth_refresh_token.clone()),
            sender,
            sender_login: config.from_email.clone(),
            smtp_host: config.smtp_host.clone(),
            smtp_port: config.smtp_port,
            session: RwLock::new(None),
        })
    }

    /// Returns the cached transport, refreshing the token and rebuilding
    /// the transport when the token is close to expiry.
    async fn mailer(&self) -> Result<SmtpMailer, MailError> {
        {
            let cached = self.session.read().await;
            if let Some(session) = cached.as_ref().filter(|s| s.is_fresh(Instant::now())) {
                return Ok(session.mailer.clone());
            }
        }

        let mut cached = self.session.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(session) = cached.as_ref().filter(|s| s.is_fresh(Instant::now())) {
            return Ok(session.mailer.clone());
        }

        let token = self.refresh().await?;
        let mailer = self.build_mailer(SecretString::new(token.access_token))?;
        let session = CachedSession::new(mailer.clone(), token.expires_in, Instant::now());
        *cached = Some(session);
        Ok(mailer)
    }

    fn build_mailer(&self, access_token: SecretString) -> Result<SmtpMailer, MailError> {
        Ok(SmtpMailer::starttls_relay(&self.smtp_host)
            .map_err(|e| MailError::Delivery(e.to_string()))?
            .port(self.smtp_port)
            .credentials(Credentials::new(
                self.sender_login.clone(),
                access_token.expose_secret().clone(),
            ))
            .authentication(vec![Mechanism::Xoauth2])
            .build())
    }

    async fn refresh(&self) -> Result<TokenResponse, MailError> {
        debug!(endpoint = %self.token_endpoint, "Refreshing mail access token");

        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret().as_str()),
                ("refresh_token", self.refresh_token.expose_secret().as_str()),
            ])
            .send()
            .await
            .map_err(|e| MailError::Authorization(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Authorization(format!(
                "token endpoint returned {}: {}",
                status,
                body.trim()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| MailError::Authorization(format!("invalid token response: {}", e)))?;

        info!(expires_in = token.expires_in, "Mail access token refreshed");
        Ok(token)
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let to: Mailbox = email
            .to
            .as_str()
            .parse()
            .map_err(|e| MailError::InvalidMessage(format!("invalid recipient: {}", e)))?;

        Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(email.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| MailError::InvalidMessage(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for GmailMailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        let mailer = self.mailer().await?;

        mailer
            .send(message)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        debug!(to = %email.to, "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EmailAddress;

    fn config() -> EmailConfig {
        EmailConfig {
            oauth_client_id: "client".to_string(),
            oauth_client_secret: "secret".to_string(),
            oauth_refresh_token: "refresh".to_string(),
            from_email: "newsletter@example.com".to_string(),
            ..Default::default()
        }
    }

    fn offline_transport() -> GmailMailTransport {
        GmailMailTransport::new(&EmailConfig {
            token_endpoint: "http://127.0.0.1:9/token".to_string(),
            ..config()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn session_lifetime_keeps_margin() {
        let transport = offline_transport();
        let now = Instant::now();
        let mailer = transport.build_mailer(SecretString::new("abc".to_string())).unwrap();

        let session = CachedSession::new(mailer, 3600, now);
        assert!(session.is_fresh(now + Duration::from_secs(3500)));
        assert!(!session.is_fresh(now + Duration::from_secs(3541)));
    }

    #[tokio::test]
    async fn very_short_lifetime_is_immediately_stale() {
        let transport = offline_transport();
        let now = Instant::now();
        let mailer = transport.build_mailer(SecretString::new("abc".to_string())).unwrap();

        assert!(!CachedSession::new(mailer, 30, now).is_fresh(now));
    }

    #[tokio::test]
    async fn fresh_session_is_reused_without_refresh() {
        let transport = offline_transport();
        let mailer = transport.build_mailer(SecretString::new("abc".to_string())).unwrap();
        *transport.session.write().await = Some(CachedSession::new(mailer, 3600, Instant::now()));

        // The token endpoint is unreachable, so any refresh would fail.
        assert!(transport.mailer().await.is_ok());
        assert!(transport.mailer().await.is_ok());
    }

    #[tokio::test]
    async fn stale_session_triggers_refresh() {
        let transport = offline_transport();
        let mailer = transport.build_mailer(SecretString::new("abc".to_string())).unwrap();
        *transport.session.write().await = Some(CachedSession::new(mailer, 0, Instant::now()));

        assert!(matches!(
            transport.mailer().await,
            Err(MailError::Authorization(_))
        ));
    }

    #[test]
    fn token_response_defaults_expiry() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token":"ya29.x","token_type":"Bearer"}"#).unwrap();
        assert_eq!(parsed.expires_in, 3600);
    }

    #[test]
    fn builds_multipart_message() {
        let transport = GmailMailTransport::new(&config()).unwrap();
        let email = OutgoingEmail {
            to: EmailAddress::parse("reader@example.com").unwrap(),
            subject: "週報".to_string(),
            html: "<p>Hello</p>".to_string(),
            text: "Hello".to_string(),
        };

        let message = transport.build_message(&email).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: Quillhouse <newsletter@example.com>"));
        assert!(raw.contains("To: reader@example.com"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn invalid_sender_is_rejected() {
        let config = EmailConfig {
            from_email: "not an address".to_string(),
            ..config()
        };
        assert!(matches!(
            GmailMailTransport::new(&config),
            Err(MailError::InvalidMessage(_))
        ));
    }
}
