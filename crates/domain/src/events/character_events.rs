//! Character-related domain events
//!
//! These enums communicate what happened when character state was modified,
//! allowing callers to react appropriately.

use crate::value_objects::{CharacterName, Level, Relationship};

/// Outcome of adding a relationship to a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipUpsert {
    /// No relationship with this target existed; it was appended
    Added,
    /// A relationship with this target existed and was overwritten in place
    Updated { previous: Relationship },
}

impl RelationshipUpsert {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Outcome of updating character metadata fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterUpdate {
    NameChanged { from: CharacterName, to: CharacterName },
    LevelChanged { from: Level, to: Level },
    /// The new value equalled the old one
    Unchanged,
}
