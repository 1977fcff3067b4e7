//! Strongly-typed identifiers for records and sessions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::aggregates::AggregateError;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse the hyphenated (or simple) textual form
            pub fn parse(value: &str) -> Result<Self, AggregateError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| AggregateError::MalformedInput(format!("'{}' is not a valid uuid", value)))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(RecordId);

/// Token a sheet is stored under in the external store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey(String);

impl SessionKey {
    pub const MAX_LENGTH: usize = 128;

    /// Accepts ASCII letters, digits, `-` and `_`
    pub fn new(value: impl Into<String>) -> Result<Self, AggregateError> {
        let value = value.into();
        if value.is_empty() || value.len() > Self::MAX_LENGTH {
            return Err(AggregateError::validation(
                "session",
                format!("must be 1 to {} characters long", Self::MAX_LENGTH),
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AggregateError::validation(
                "session",
                "may only contain letters, digits, '-' and '_'",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_parse() {
        let id = RecordId::new();
        assert_eq!(RecordId::parse(&id.to_string()).ok(), Some(id));
        assert!(matches!(
            RecordId::parse("not-a-uuid"),
            Err(AggregateError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_session_key_validation() {
        assert!(SessionKey::new("player-one_2").is_ok());
        assert!(SessionKey::new("").is_err());
        assert!(SessionKey::new("has space").is_err());
        assert!(SessionKey::new("x".repeat(129)).is_err());
    }
}
