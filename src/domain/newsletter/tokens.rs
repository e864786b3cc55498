//! Random opaque tokens embedded in newsletter links.

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Length of freshly generated tokens.
pub const TOKEN_LEN: usize = 32;

/// Upper bound accepted when parsing tokens coming back from links.
const MAX_TOKEN_LEN: usize = 128;

fn random_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn check_token(field: &str, raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if raw.len() > MAX_TOKEN_LEN || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::invalid_format(field, "expected an alphanumeric token"));
    }
    Ok(())
}

macro_rules! opaque_token {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a new random token.
            pub fn generate() -> Self {
                Self(random_token())
            }

            /// Accepts a token received from a link.
            pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
                let raw = raw.as_ref().trim();
                check_token($field, raw)?;
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        // Tokens act as bearer credentials; keep them out of logs.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let prefix: String = self.0.chars().take(4).collect();
                write!(f, concat!(stringify!($name), "({}…)"), prefix)
            }
        }
    };
}

opaque_token!(
    /// Identifies a subscriber in unsubscribe links.
    UnsubscribeToken,
    "unsubscribe_token"
);

opaque_token!(
    /// Correlates open/click events with one email send.
    TrackingToken,
    "tracking_token"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_alphanumeric_and_sized() {
        let token = TrackingToken::generate();
        assert_eq!(token.as_str().len(), TOKEN_LEN);
        assert!(token.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_tokens_differ() {
        assert_ne!(UnsubscribeToken::generate(), UnsubscribeToken::generate());
    }

    #[test]
    fn parse_rejects_punctuation_and_empty() {
        assert!(TrackingToken::parse("").is_err());
        assert!(TrackingToken::parse("abc/../def").is_err());
        assert!(TrackingToken::parse("a".repeat(200)).is_err());
    }

    #[test]
    fn parse_trims_whitespace() {
        let token = UnsubscribeToken::parse(" abc123 ").unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn debug_output_is_truncated() {
        let token = TrackingToken::parse("abcdefgh").unwrap();
        assert_eq!(format!("{:?}", token), "TrackingToken(abcd…)");
    }
}
