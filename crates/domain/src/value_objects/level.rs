//! Character level, bounded to `[1, 100]`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Level(u32);

impl Level {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the value is outside 1..=100.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < i64::from(MIN_LEVEL) || value > i64::from(MAX_LEVEL) {
            return Err(DomainError::validation(format!(
                "Level must be between {} and {}, got {}",
                MIN_LEVEL, MAX_LEVEL, value
            )));
        }
        // Range checked above
        Ok(Self(value as u32))
    }

    pub const fn first() -> Self {
        Self(MIN_LEVEL)
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The next level, or an error at the cap.
    pub fn next(&self) -> Result<Self, DomainError> {
        if self.0 >= MAX_LEVEL {
            return Err(DomainError::constraint(format!(
                "Level is already at the maximum of {}",
                MAX_LEVEL
            )));
        }
        Ok(Self(self.0 + 1))
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Level {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> u32 {
        level.0
    }
}
