//! Character stat block - six bounded ability scores
//!
//! # Invariants
//!
//! - Every score is within `[MIN_STAT, MAX_STAT]`
//! - There is no way to obtain an out-of-range `CharacterStats`: the
//!   constructor, `set`, and deserialization all run `check_score`

use serde::{Deserialize, Serialize};

use super::stat::Ability;
use crate::error::DomainError;

/// Lowest allowed ability score
pub const MIN_STAT: i32 = 1;

/// Highest allowed ability score
pub const MAX_STAT: i32 = 25;

/// Score given to every ability on a fresh sheet
pub const DEFAULT_STAT: i32 = 10;

/// Validate a single ability score.
pub fn check_score(ability: Ability, value: i64) -> Result<i32, DomainError> {
    if value < i64::from(MIN_STAT) || value > i64::from(MAX_STAT) {
        return Err(DomainError::validation(format!(
            "{} must be between {} and {}, got {}",
            ability.display_name(),
            MIN_STAT,
            MAX_STAT,
            value
        )));
    }
    // Range checked above
    Ok(value as i32)
}

/// Ability modifier: `floor((value - 10) / 2)`.
pub fn modifier(value: i32) -> i32 {
    (value - 10).div_euclid(2)
}

/// The six ability scores of a character.
///
/// # Example
///
/// ```
/// use charsheet_domain::value_objects::{Ability, CharacterStats};
///
/// let stats = CharacterStats::new(16, 12, 14, 10, 8, 13).unwrap();
/// assert_eq!(stats.total_points(), 73);
/// assert_eq!(stats.modifier(Ability::Strength), 3);
/// assert_eq!(stats.modifier(Ability::Wisdom), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StatsWireFormat", into = "StatsWireFormat")]
pub struct CharacterStats {
    strength: i32,
    agility: i32,
    constitution: i32,
    intelligence: i32,
    wisdom: i32,
    charisma: i32,
}

impl CharacterStats {
    /// Create a stat block, rejecting any out-of-range score.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first offending ability.
    pub fn new(
        strength: i32,
        agility: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            strength: check_score(Ability::Strength, i64::from(strength))?,
            agility: check_score(Ability::Agility, i64::from(agility))?,
            constitution: check_score(Ability::Constitution, i64::from(constitution))?,
            intelligence: check_score(Ability::Intelligence, i64::from(intelligence))?,
            wisdom: check_score(Ability::Wisdom, i64::from(wisdom))?,
            charisma: check_score(Ability::Charisma, i64::from(charisma))?,
        })
    }

    #[inline]
    pub fn strength(&self) -> i32 {
        self.strength
    }

    #[inline]
    pub fn agility(&self) -> i32 {
        self.agility
    }

    #[inline]
    pub fn constitution(&self) -> i32 {
        self.constitution
    }

    #[inline]
    pub fn intelligence(&self) -> i32 {
        self.intelligence
    }

    #[inline]
    pub fn wisdom(&self) -> i32 {
        self.wisdom
    }

    #[inline]
    pub fn charisma(&self) -> i32 {
        self.charisma
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Agility => self.agility,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Set one score. The block is left untouched on error.
    pub fn set(&mut self, ability: Ability, value: i32) -> Result<(), DomainError> {
        let value = check_score(ability, i64::from(value))?;
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Agility => &mut self.agility,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *slot = value;
        Ok(())
    }

    /// Builder-style variant of `set`.
    pub fn with(mut self, ability: Ability, value: i32) -> Result<Self, DomainError> {
        self.set(ability, value)?;
        Ok(self)
    }

    pub fn total_points(&self) -> i32 {
        Ability::all().iter().map(|a| self.get(*a)).sum()
    }

    pub fn average(&self) -> f64 {
        f64::from(self.total_points()) / 6.0
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        modifier(self.get(ability))
    }

    /// Highest-scoring ability; ties go to the earlier one in sheet order.
    pub fn highest(&self) -> Ability {
        let mut best = Ability::Strength;
        for ability in Ability::all() {
            if self.get(ability) > self.get(best) {
                best = ability;
            }
        }
        best
    }

    /// Lowest-scoring ability; ties go to the earlier one in sheet order.
    pub fn lowest(&self) -> Ability {
        let mut worst = Ability::Strength;
        for ability in Ability::all() {
            if self.get(ability) < self.get(worst) {
                worst = ability;
            }
        }
        worst
    }

    /// Iterate `(ability, score)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::all().into_iter().map(move |a| (a, self.get(a)))
    }
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STAT,
            agility: DEFAULT_STAT,
            constitution: DEFAULT_STAT,
            intelligence: DEFAULT_STAT,
            wisdom: DEFAULT_STAT,
            charisma: DEFAULT_STAT,
        }
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Wire format for the `stats` object; missing scores take the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsWireFormat {
    #[serde(default = "default_stat")]
    pub strength: i64,
    #[serde(default = "default_stat")]
    pub agility: i64,
    #[serde(default = "default_stat")]
    pub constitution: i64,
    #[serde(default = "default_stat")]
    pub intelligence: i64,
    #[serde(default = "default_stat")]
    pub wisdom: i64,
    #[serde(default = "default_stat")]
    pub charisma: i64,
}

fn default_stat() -> i64 {
    i64::from(DEFAULT_STAT)
}

impl Default for StatsWireFormat {
    fn default() -> Self {
        CharacterStats::default().into()
    }
}

impl TryFrom<StatsWireFormat> for CharacterStats {
    type Error = DomainError;

    fn try_from(wire: StatsWireFormat) -> Result<Self, Self::Error> {
        Ok(Self {
            strength: check_score(Ability::Strength, wire.strength)?,
            agility: check_score(Ability::Agility, wire.agility)?,
            constitution: check_score(Ability::Constitution, wire.constitution)?,
            intelligence: check_score(Ability::Intelligence, wire.intelligence)?,
            wisdom: check_score(Ability::Wisdom, wire.wisdom)?,
            charisma: check_score(Ability::Charisma, wire.charisma)?,
        })
    }
}

impl From<CharacterStats> for StatsWireFormat {
    fn from(stats: CharacterStats) -> Self {
        Self {
            strength: i64::from(stats.strength),
            agility: i64::from(stats.agility),
            constitution: i64::from(stats.constitution),
            intelligence: i64::from(stats.intelligence),
            wisdom: i64::from(stats.wisdom),
            charisma: i64::from(stats.charisma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CharacterStats {
        CharacterStats::new(18, 14, 12, 9, 7, 25).unwrap()
    }

    #[test]
    fn default_is_all_tens() {
        let stats = CharacterStats::default();
        assert!(stats.iter().all(|(_, v)| v == DEFAULT_STAT));
        assert_eq!(stats.total_points(), 60);
        assert_eq!(stats.average(), 10.0);
    }

    #[test]
    fn total_and_average_follow_the_fields() {
        let stats = sample();
        let sum = stats.strength()
            + stats.agility()
            + stats.constitution()
            + stats.intelligence()
            + stats.wisdom()
            + stats.charisma();
        assert_eq!(stats.total_points(), sum);
        assert_eq!(stats.average(), f64::from(sum) / 6.0);
    }

    #[test]
    fn modifier_floors_toward_negative_infinity() {
        assert_eq!(modifier(10), 0);
        assert_eq!(modifier(11), 0);
        assert_eq!(modifier(12), 1);
        assert_eq!(modifier(9), -1);
        assert_eq!(modifier(8), -1);
        assert_eq!(modifier(1), -5);
        assert_eq!(modifier(25), 7);
    }

    #[test]
    fn new_rejects_out_of_range_scores() {
        let err = CharacterStats::new(26, 10, 10, 10, 10, 10).unwrap_err();
        assert_eq!(err.message(), "Strength must be between 1 and 25, got 26");
        assert!(CharacterStats::new(10, 0, 10, 10, 10, 10).is_err());
    }

    #[test]
    fn set_rejects_and_preserves_previous_value() {
        let mut stats = CharacterStats::default();
        assert!(stats.set(Ability::Wisdom, 26).is_err());
        assert_eq!(stats.wisdom(), DEFAULT_STAT);
        stats.set(Ability::Wisdom, 25).unwrap();
        assert_eq!(stats.wisdom(), 25);
    }

    #[test]
    fn highest_and_lowest() {
        let stats = sample();
        assert_eq!(stats.highest(), Ability::Charisma);
        assert_eq!(stats.lowest(), Ability::Wisdom);
    }

    #[test]
    fn serde_roundtrip_and_validation() {
        let stats = sample();
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["charisma"], 25);
        let parsed: CharacterStats = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, stats);

        let bad = serde_json::json!({"strength": 26});
        assert!(serde_json::from_value::<CharacterStats>(bad).is_err());
    }
}
