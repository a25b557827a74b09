//! Enneagram type graph
//!
//! The nine types sit on a ring (1..9, wrapping) that defines wing adjacency.
//! Integration and disintegration lines are a separate fixed mapping that does
//! not follow the ring, so both tables are spelled out rather than computed.
//!
//! Every function here is total over the nine variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the nine Enneagram personality types.
///
/// Serialized as its number (`1`..=`9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EnneagramType {
    Reformer,
    Helper,
    Achiever,
    Individualist,
    Investigator,
    Loyalist,
    Enthusiast,
    Challenger,
    Peacemaker,
}

impl EnneagramType {
    /// All nine types in ring order.
    pub const fn all() -> [EnneagramType; 9] {
        [
            Self::Reformer,
            Self::Helper,
            Self::Achiever,
            Self::Individualist,
            Self::Investigator,
            Self::Loyalist,
            Self::Enthusiast,
            Self::Challenger,
            Self::Peacemaker,
        ]
    }

    /// The type's number on the ring (1..=9).
    pub const fn number(self) -> u8 {
        match self {
            Self::Reformer => 1,
            Self::Helper => 2,
            Self::Achiever => 3,
            Self::Individualist => 4,
            Self::Investigator => 5,
            Self::Loyalist => 6,
            Self::Enthusiast => 7,
            Self::Challenger => 8,
            Self::Peacemaker => 9,
        }
    }

    /// Look up a type by its number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for numbers outside 1..=9.
    pub fn from_number(number: u8) -> Result<Self, DomainError> {
        match number {
            1 => Ok(Self::Reformer),
            2 => Ok(Self::Helper),
            3 => Ok(Self::Achiever),
            4 => Ok(Self::Individualist),
            5 => Ok(Self::Investigator),
            6 => Ok(Self::Loyalist),
            7 => Ok(Self::Enthusiast),
            8 => Ok(Self::Challenger),
            9 => Ok(Self::Peacemaker),
            other => Err(DomainError::validation(format!(
                "Enneagram type must be between 1 and 9, got {}",
                other
            ))),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Reformer => "The Reformer",
            Self::Helper => "The Helper",
            Self::Achiever => "The Achiever",
            Self::Individualist => "The Individualist",
            Self::Investigator => "The Investigator",
            Self::Loyalist => "The Loyalist",
            Self::Enthusiast => "The Enthusiast",
            Self::Challenger => "The Challenger",
            Self::Peacemaker => "The Peacemaker",
        }
    }

    /// The two ring neighbours, lower number first (1 and 9 wrap).
    pub fn adjacent_types(self) -> [EnneagramType; 2] {
        let n = self.number();
        let below = if n == 1 { 9 } else { n - 1 };
        let above = if n == 9 { 1 } else { n + 1 };
        [ring(below), ring(above)]
    }

    /// Whether `other` is a valid wing for this type.
    pub fn is_adjacent(self, other: EnneagramType) -> bool {
        self.adjacent_types().contains(&other)
    }

    /// Direction of growth.
    pub const fn integration_point(self) -> EnneagramType {
        match self {
            Self::Reformer => Self::Enthusiast,
            Self::Helper => Self::Individualist,
            Self::Achiever => Self::Loyalist,
            Self::Individualist => Self::Reformer,
            Self::Investigator => Self::Challenger,
            Self::Loyalist => Self::Peacemaker,
            Self::Enthusiast => Self::Investigator,
            Self::Challenger => Self::Helper,
            Self::Peacemaker => Self::Achiever,
        }
    }

    /// Direction of stress.
    pub const fn disintegration_point(self) -> EnneagramType {
        match self {
            Self::Reformer => Self::Individualist,
            Self::Helper => Self::Challenger,
            Self::Achiever => Self::Peacemaker,
            Self::Individualist => Self::Helper,
            Self::Investigator => Self::Enthusiast,
            Self::Loyalist => Self::Achiever,
            Self::Enthusiast => Self::Reformer,
            Self::Challenger => Self::Investigator,
            Self::Peacemaker => Self::Loyalist,
        }
    }

    pub const fn triad(self) -> Triad {
        match self {
            Self::Challenger | Self::Peacemaker | Self::Reformer => Triad::Gut,
            Self::Helper | Self::Achiever | Self::Individualist => Triad::Heart,
            Self::Investigator | Self::Loyalist | Self::Enthusiast => Triad::Head,
        }
    }
}

/// Ring lookup for numbers already known to be in 1..=9.
fn ring(number: u8) -> EnneagramType {
    EnneagramType::all()[usize::from(number - 1)]
}

impl fmt::Display for EnneagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for EnneagramType {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl From<EnneagramType> for u8 {
    fn from(value: EnneagramType) -> u8 {
        value.number()
    }
}

impl FromStr for EnneagramType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::parse(format!("Unknown Enneagram type: {}", s)))?;
        Self::from_number(number)
    }
}

/// The three centers of intelligence, each holding three types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Triad {
    /// Instinctive center: 8, 9, 1
    Gut,
    /// Feeling center: 2, 3, 4
    Heart,
    /// Thinking center: 5, 6, 7
    Head,
}

impl Triad {
    pub const fn members(self) -> [EnneagramType; 3] {
        match self {
            Self::Gut => [
                EnneagramType::Challenger,
                EnneagramType::Peacemaker,
                EnneagramType::Reformer,
            ],
            Self::Heart => [
                EnneagramType::Helper,
                EnneagramType::Achiever,
                EnneagramType::Individualist,
            ],
            Self::Head => [
                EnneagramType::Investigator,
                EnneagramType::Loyalist,
                EnneagramType::Enthusiast,
            ],
        }
    }
}

/// Instinctual variants; a profile stacks all three in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instinct {
    #[serde(rename = "sp")]
    SelfPreservation,
    #[serde(rename = "so")]
    Social,
    #[serde(rename = "sx")]
    Sexual,
}

impl Instinct {
    pub const fn all() -> [Instinct; 3] {
        [Self::SelfPreservation, Self::Social, Self::Sexual]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfPreservation => "sp",
            Self::Social => "so",
            Self::Sexual => "sx",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SelfPreservation => "Self-Preservation",
            Self::Social => "Social",
            Self::Sexual => "One-to-One",
        }
    }
}

impl fmt::Display for Instinct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Instinct {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sp" | "self-preservation" | "self_preservation" => Ok(Self::SelfPreservation),
            "so" | "social" => Ok(Self::Social),
            "sx" | "sexual" | "one-to-one" => Ok(Self::Sexual),
            _ => Err(DomainError::parse(format!("Unknown instinct: {}", s))),
        }
    }
}
