//! Ability value object - names one of the six character stats.
//!
//! Provides type safety for stat references instead of using magic strings like "STR", "AGI".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The six core abilities tracked on every character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Physical power
    Strength,
    /// Speed and reflexes
    Agility,
    /// Endurance and health
    Constitution,
    /// Reasoning and memory
    Intelligence,
    /// Perception and insight
    Wisdom,
    /// Force of personality
    Charisma,
}

impl Ability {
    /// Returns the short uppercase string representation (e.g., "STR", "AGI").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Agility => "AGI",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Returns the full name of the ability (e.g., "Strength").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Agility => "Agility",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }

    /// Key used in the serialized `stats` object.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Agility => "agility",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }

    /// All six abilities in sheet order.
    pub const fn all() -> [Ability; 6] {
        [
            Self::Strength,
            Self::Agility,
            Self::Constitution,
            Self::Intelligence,
            Self::Wisdom,
            Self::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STR" | "STRENGTH" => Ok(Self::Strength),
            "AGI" | "DEX" | "AGILITY" | "DEXTERITY" => Ok(Self::Agility),
            "CON" | "CONSTITUTION" => Ok(Self::Constitution),
            "INT" | "INTELLIGENCE" => Ok(Self::Intelligence),
            "WIS" | "WISDOM" => Ok(Self::Wisdom),
            "CHA" | "CHARISMA" => Ok(Self::Charisma),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_as_str() {
        assert_eq!(Ability::Strength.as_str(), "STR");
        assert_eq!(Ability::Agility.as_str(), "AGI");
        assert_eq!(Ability::Charisma.as_str(), "CHA");
    }

    #[test]
    fn test_ability_from_str() {
        assert_eq!(Ability::from_str("str").unwrap(), Ability::Strength);
        assert_eq!(Ability::from_str("Dexterity").unwrap(), Ability::Agility);
        assert_eq!(Ability::from_str("wisdom").unwrap(), Ability::Wisdom);
        assert!(Ability::from_str("LUCK").is_err());
    }

    #[test]
    fn test_field_names_match_serde() {
        for ability in Ability::all() {
            let json = serde_json::to_string(&ability).unwrap();
            assert_eq!(json, format!("\"{}\"", ability.field_name()));
        }
    }
}
