//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a UUID-backed identifier with the usual constructors.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a blog post.
    PostId
);

uuid_id!(
    /// Unique identifier for a newsletter subscriber.
    SubscriberId
);

uuid_id!(
    /// Unique identifier for a per-recipient email send record.
    EmailStatId
);

uuid_id!(
    /// Unique identifier for a recorded login attempt.
    LoginAttemptId
);

/// Identifier of a user in the hosted auth provider (the JWT `sub` claim).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_generates_unique_values() {
        assert_ne!(PostId::new(), PostId::new());
    }

    #[test]
    fn subscriber_id_parses_from_string() {
        let id = SubscriberId::new();
        let parsed: SubscriberId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn email_stat_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<EmailStatId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let uuid = Uuid::new_v4();
        let id = PostId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn user_id_rejects_blank() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_keeps_raw_value() {
        let id = UserId::new("8c1f0b4e-auth-sub").unwrap();
        assert_eq!(id.as_str(), "8c1f0b4e-auth-sub");
        assert_eq!(id.to_string(), "8c1f0b4e-auth-sub");
    }
}
