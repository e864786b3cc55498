//! Tracking and unsubscribe links embedded in newsletter emails.
//!
//! Click links are signed with HMAC-SHA256 over the tracking token and the
//! destination, so the redirect endpoint only forwards to URLs that were
//! actually placed in an email.

use hmac::{Hmac, Mac};
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::tokens::{TrackingToken, UnsubscribeToken};

type HmacSha256 = Hmac<Sha256>;

pub const OPEN_PIXEL_PATH: &str = "/api/newsletter/track/open";
pub const CLICK_PATH: &str = "/api/newsletter/track/click";
pub const UNSUBSCRIBE_PATH: &str = "/api/newsletter/unsubscribe";

/// Signs and verifies tracked click destinations.
#[derive(Clone)]
pub struct LinkSigner {
    secret: SecretString,
}

impl LinkSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    fn mac(&self, token: &TrackingToken, target: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(token.as_str().as_bytes());
        mac.update(b"\n");
        mac.update(target.as_bytes());
        mac
    }

    /// Hex-encoded signature for `target` under `token`.
    pub fn sign(&self, token: &TrackingToken, target: &str) -> String {
        hex::encode(self.mac(token, target).finalize().into_bytes())
    }

    /// Constant-time check of a signature taken from a click link.
    pub fn verify(&self, token: &TrackingToken, target: &str, signature: &str) -> bool {
        let Ok(provided) = hex::decode(signature.trim()) else {
            return false;
        };
        let expected = self.mac(token, target).finalize().into_bytes();
        expected.as_slice().ct_eq(&provided).unwrap_u8() == 1
    }
}

impl std::fmt::Debug for LinkSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkSigner").finish_non_exhaustive()
    }
}

/// Builds absolute URLs pointing back at this service.
#[derive(Debug, Clone)]
pub struct TrackingLinks {
    site_url: String,
    signer: LinkSigner,
}

impl TrackingLinks {
    pub fn new(site_url: impl Into<String>, signer: LinkSigner) -> Self {
        let site_url = site_url.into().trim_end_matches('/').to_string();
        Self { site_url, signer }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn signer(&self) -> &LinkSigner {
        &self.signer
    }

    /// Absolute URL for a site-relative path.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}/{}", self.site_url, path.trim_start_matches('/'))
    }

    fn with_query(&self, path: &str, params: &[(&str, &str)]) -> String {
        let base = self.absolute(path);
        match Url::parse_with_params(&base, params) {
            Ok(url) => url.to_string(),
            // site_url is validated at startup; keep the bare path if it is not
            Err(_) => base,
        }
    }

    pub fn open_pixel_url(&self, token: &TrackingToken) -> String {
        self.with_query(OPEN_PIXEL_PATH, &[("token", token.as_str())])
    }

    pub fn click_url(&self, token: &TrackingToken, target: &str) -> String {
        let sig = self.signer.sign(token, target);
        self.with_query(
            CLICK_PATH,
            &[("token", token.as_str()), ("url", target), ("sig", &sig)],
        )
    }

    pub fn unsubscribe_url(&self, token: &UnsubscribeToken) -> String {
        self.with_query(UNSUBSCRIBE_PATH, &[("token", token.as_str())])
    }

    /// Where a click should land. Falls back to the site root when the
    /// signature does not match or the target is not an http(s) URL.
    pub fn resolve_click_target(
        &self,
        token: &TrackingToken,
        target: &str,
        signature: &str,
    ) -> String {
        let is_web_url = Url::parse(target)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);

        if is_web_url && self.signer.verify(token, target, signature) {
            target.to_string()
        } else {
            self.site_url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> TrackingLinks {
        TrackingLinks::new("https://blog.example.com/", LinkSigner::new("test-secret"))
    }

    #[test]
    fn site_url_trailing_slash_is_trimmed() {
        assert_eq!(links().site_url(), "https://blog.example.com");
        assert_eq!(
            links().absolute("/posts/hello"),
            "https://blog.example.com/posts/hello"
        );
    }

    #[test]
    fn open_pixel_carries_token() {
        let token = TrackingToken::parse("abc123").unwrap();
        assert_eq!(
            links().open_pixel_url(&token),
            "https://blog.example.com/api/newsletter/track/open?token=abc123"
        );
    }

    #[test]
    fn click_url_encodes_target() {
        let token = TrackingToken::parse("abc123").unwrap();
        let url = links().click_url(&token, "https://blog.example.com/posts/a?b=c");
        assert!(url.starts_with("https://blog.example.com/api/newsletter/track/click?token=abc123&url=https%3A%2F%2F"));
        assert!(url.contains("&sig="));
    }

    #[test]
    fn signature_verifies_only_for_same_token_and_target() {
        let signer = LinkSigner::new("k");
        let token = TrackingToken::parse("tok").unwrap();
        let other = TrackingToken::parse("other").unwrap();
        let sig = signer.sign(&token, "https://x.io");

        assert!(signer.verify(&token, "https://x.io", &sig));
        assert!(!signer.verify(&other, "https://x.io", &sig));
        assert!(!signer.verify(&token, "https://evil.io", &sig));
        assert!(!signer.verify(&token, "https://x.io", "zz"));
    }

    #[test]
    fn resolve_click_falls_back_to_site() {
        let links = links();
        let token = TrackingToken::parse("tok").unwrap();
        let good = "https://blog.example.com/posts/a";
        let sig = links.signer().sign(&token, good);

        assert_eq!(links.resolve_click_target(&token, good, &sig), good);
        assert_eq!(
            links.resolve_click_target(&token, "https://evil.io", &sig),
            "https://blog.example.com"
        );

        let js = "javascript:alert(1)";
        let js_sig = links.signer().sign(&token, js);
        assert_eq!(
            links.resolve_click_target(&token, js, &js_sig),
            "https://blog.example.com"
        );
    }

    #[test]
    fn signature_is_lowercase_hex_sha256() {
        let signer = LinkSigner::new("k");
        let token = TrackingToken::parse("tok").unwrap();
        let sig = signer.sign(&token, "https://x.io");

        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert!(signer.verify(&token, "https://x.io", &format!(" {} ", sig)));
        assert!(!signer.verify(&token, "https://x.io", &sig[..63]));
        assert!(!signer.verify(&token, "https://x.io", "gg"));
    }
}
