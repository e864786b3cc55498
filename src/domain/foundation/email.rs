//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A normalized email address: trimmed, lower-cased, `local@domain`.
///
/// Deliverability is not checked here. The only structural rule is a
/// single `@` with text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        match normalized.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(normalized))
            }
            _ => Err(ValidationError::invalid_format(
                "email",
                "expected a single '@' between local part and domain",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}
