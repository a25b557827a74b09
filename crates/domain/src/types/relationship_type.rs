//! Relationship categories between characters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Types of relationships between characters.
///
/// Closed set; serialized in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Ally,
    Friend,
    Family,
    Romantic,
    Mentor,
    Student,
    Rival,
    Enemy,
    Acquaintance,
    Professional,
    #[default]
    Neutral,
}

impl RelationshipType {
    /// Get all relationship types for UI dropdowns
    pub fn all() -> &'static [RelationshipType] {
        &[
            Self::Ally,
            Self::Friend,
            Self::Family,
            Self::Romantic,
            Self::Mentor,
            Self::Student,
            Self::Rival,
            Self::Enemy,
            Self::Acquaintance,
            Self::Professional,
            Self::Neutral,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ally => "ally",
            Self::Friend => "friend",
            Self::Family => "family",
            Self::Romantic => "romantic",
            Self::Mentor => "mentor",
            Self::Student => "student",
            Self::Rival => "rival",
            Self::Enemy => "enemy",
            Self::Acquaintance => "acquaintance",
            Self::Professional => "professional",
            Self::Neutral => "neutral",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ally => "Ally",
            Self::Friend => "Friend",
            Self::Family => "Family",
            Self::Romantic => "Romantic",
            Self::Mentor => "Mentor",
            Self::Student => "Student",
            Self::Rival => "Rival",
            Self::Enemy => "Enemy",
            Self::Acquaintance => "Acquaintance",
            Self::Professional => "Professional",
            Self::Neutral => "Neutral",
        }
    }

    /// Whether this kind of relationship counts as favourable.
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            Self::Ally | Self::Friend | Self::Family | Self::Romantic | Self::Mentor | Self::Student
        )
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = DomainError;

    /// Parse a relationship type (case-insensitive).
    ///
    /// Accepts the canonical names plus a few aliases:
    /// "friendship" -> Friend, "enmity" -> Enemy, "rivalry" -> Rival, "mentorship" -> Mentor
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace(['_', ' ', '-'], "");
        match normalized.as_str() {
            "ally" => Ok(Self::Ally),
            "friend" | "friendship" => Ok(Self::Friend),
            "family" => Ok(Self::Family),
            "romantic" | "romance" => Ok(Self::Romantic),
            "mentor" | "mentorship" => Ok(Self::Mentor),
            "student" | "apprentice" => Ok(Self::Student),
            "rival" | "rivalry" => Ok(Self::Rival),
            "enemy" | "enmity" => Ok(Self::Enemy),
            "acquaintance" => Ok(Self::Acquaintance),
            "professional" | "colleague" => Ok(Self::Professional),
            "neutral" => Ok(Self::Neutral),
            _ => Err(DomainError::parse(format!("Unknown relationship type: {}", s))),
        }
    }
}
