//! Character relationships for social network modeling
//!
//! A relationship is keyed by the id of the character it points at. The
//! owning `Character` keeps at most one relationship per target.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::names::{CharacterName, RelationshipNote};
use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::types::RelationshipType;

pub const MIN_RELATIONSHIP_STRENGTH: u8 = 1;
pub const MAX_RELATIONSHIP_STRENGTH: u8 = 10;
pub const DEFAULT_RELATIONSHIP_STRENGTH: u8 = 5;

/// Validate a relationship strength.
pub fn check_strength(strength: i64) -> Result<u8, DomainError> {
    if strength < i64::from(MIN_RELATIONSHIP_STRENGTH)
        || strength > i64::from(MAX_RELATIONSHIP_STRENGTH)
    {
        return Err(DomainError::validation(format!(
            "Relationship strength must be between {} and {}, got {}",
            MIN_RELATIONSHIP_STRENGTH, MAX_RELATIONSHIP_STRENGTH, strength
        )));
    }
    // Range checked above
    Ok(strength as u8)
}

/// A relationship from the owning character to another character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    target_id: CharacterId,
    target_name: CharacterName,
    relationship_type: RelationshipType,
    description: RelationshipNote,
    strength: u8,
}

impl Relationship {
    pub fn new(
        target_id: CharacterId,
        target_name: CharacterName,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            target_id,
            target_name,
            relationship_type,
            description: RelationshipNote::empty(),
            strength: DEFAULT_RELATIONSHIP_STRENGTH,
        }
    }

    pub fn with_description(mut self, description: RelationshipNote) -> Self {
        self.description = description;
        self
    }

    pub fn with_strength(mut self, strength: i64) -> Result<Self, DomainError> {
        self.strength = check_strength(strength)?;
        Ok(self)
    }

    #[inline]
    pub fn target_id(&self) -> &CharacterId {
        &self.target_id
    }

    #[inline]
    pub fn target_name(&self) -> &CharacterName {
        &self.target_name
    }

    #[inline]
    pub fn relationship_type(&self) -> RelationshipType {
        self.relationship_type
    }

    #[inline]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    #[inline]
    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn is_positive(&self) -> bool {
        self.relationship_type.is_positive()
    }

    pub fn set_strength(&mut self, strength: i64) -> Result<(), DomainError> {
        self.strength = check_strength(strength)?;
        Ok(())
    }

    /// Copy the mutable fields of `other` onto this relationship, keeping the target.
    pub(crate) fn merge_from(&mut self, other: Relationship) {
        self.target_name = other.target_name;
        self.relationship_type = other.relationship_type;
        self.description = other.description;
        self.strength = other.strength;
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Wire format: `{character_id, name, type, description, strength}`
///
/// Raw strings and numbers; `Relationship::try_from` validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipWireFormat {
    pub character_id: String,
    pub name: String,
    #[serde(rename = "type", default = "default_type")]
    pub relationship_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_strength")]
    pub strength: i64,
}

fn default_type() -> String {
    RelationshipType::default().as_str().to_string()
}

fn default_strength() -> i64 {
    i64::from(DEFAULT_RELATIONSHIP_STRENGTH)
}

impl From<&Relationship> for RelationshipWireFormat {
    fn from(rel: &Relationship) -> Self {
        Self {
            character_id: rel.target_id.to_string(),
            name: rel.target_name.to_string(),
            relationship_type: rel.relationship_type.as_str().to_string(),
            description: rel.description.as_str().to_string(),
            strength: i64::from(rel.strength),
        }
    }
}

impl TryFrom<RelationshipWireFormat> for Relationship {
    type Error = DomainError;

    fn try_from(wire: RelationshipWireFormat) -> Result<Self, Self::Error> {
        let target_id = CharacterId::try_from(wire.character_id)
            .map_err(|_| DomainError::validation("Relationship target id cannot be empty"))?;
        let relationship_type: RelationshipType = wire.relationship_type.parse()?;
        Relationship::new(target_id, CharacterName::new(wire.name)?, relationship_type)
            .with_description(RelationshipNote::new(wire.description)?)
            .with_strength(wire.strength)
    }
}

impl Serialize for Relationship {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RelationshipWireFormat::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Relationship {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = RelationshipWireFormat::deserialize(deserializer)?;
        Relationship::try_from(wire).map_err(serde::de::Error::custom)
    }
}
