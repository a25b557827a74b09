use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Opaque string identifiers.
///
/// New ids are random v4 UUIDs, but any non-blank string read from a file is
/// accepted and kept exactly as written.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
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
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!(
                        "{} cannot be empty",
                        stringify!($name)
                    )));
                }
                Ok(Self(value))
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Aggregate identity; also the key relationships point at
define_id!(CharacterId);

// Timeline entries
define_id!(NarrativeEventId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_uuids() {
        let id = CharacterId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, CharacterId::new());
    }

    #[test]
    fn any_non_blank_string_is_an_id() {
        let id: CharacterId = "hero-001".parse().unwrap();
        assert_eq!(id.as_str(), "hero-001");
        assert_eq!(id.to_string(), "hero-001");
    }

    #[test]
    fn blank_ids_are_rejected() {
        let err = "  ".parse::<NarrativeEventId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert!(err.to_string().contains("NarrativeEventId"));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id: CharacterId = "npc-7".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"npc-7\"");
        let back: CharacterId = serde_json::from_str("\"npc-7\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<CharacterId>("\"\"").is_err());
    }
}
