//! Enneagram personality profile
//!
//! # Invariants
//!
//! - `wing`, when set, is one of the two ring neighbours of `main_type`
//! - the instinctual stack holds `sp`, `so`, and `sx` exactly once each
//! - `development_level` is in 1..=9, `self_awareness_level` in 1..=10
//! - `dominant_instinct_strength` and every type affinity are in 0.0..=1.0
//! - tritype entries come from triads other than the main type's, and differ
//!   from each other
//! - integration and disintegration points are derived from `main_type`
//!   and cannot be set
//!
//! Every mutation goes through `try_update`, which runs `check` on a
//! candidate copy and only commits if it passes. The constructor and
//! deserialization run the same `check`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::error::DomainError;
use crate::types::{EnneagramType, Instinct, Triad};

pub const MIN_DEVELOPMENT_LEVEL: u8 = 1;
pub const MAX_DEVELOPMENT_LEVEL: u8 = 9;
pub const MIN_SELF_AWARENESS: u8 = 1;
pub const MAX_SELF_AWARENESS: u8 = 10;
pub const DEFAULT_AFFINITY: f64 = 0.5;

fn bounded_level(label: &str, value: i64, min: u8, max: u8) -> Result<u8, DomainError> {
    if value < i64::from(min) || value > i64::from(max) {
        return Err(DomainError::validation(format!(
            "{} must be between {} and {}, got {}",
            label, min, max, value
        )));
    }
    // Range checked above
    Ok(value as u8)
}

fn type_from_wire(label: &str, number: i64) -> Result<EnneagramType, DomainError> {
    u8::try_from(number)
        .ok()
        .and_then(|n| EnneagramType::from_number(n).ok())
        .ok_or_else(|| {
            DomainError::validation(format!("{} must be between 1 and 9, got {}", label, number))
        })
}

// ============================================================================
// InstinctualStack
// ============================================================================

/// Priority ordering of the three instincts, dominant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Instinct>", into = "Vec<Instinct>")]
pub struct InstinctualStack([Instinct; 3]);

impl InstinctualStack {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the list is not exactly the three
    /// instincts with no repeats.
    pub fn new(instincts: &[Instinct]) -> Result<Self, DomainError> {
        if instincts.len() != 3 {
            return Err(DomainError::validation(format!(
                "Instinctual stack must contain exactly 3 instincts, got {}",
                instincts.len()
            )));
        }
        for instinct in Instinct::all() {
            if !instincts.contains(&instinct) {
                return Err(DomainError::validation(format!(
                    "Instinctual stack is missing '{}' (each of sp, so, sx must appear once)",
                    instinct
                )));
            }
        }
        Ok(Self([instincts[0], instincts[1], instincts[2]]))
    }

    /// Parse from short codes such as `["sx", "sp", "so"]`.
    pub fn parse<S: AsRef<str>>(codes: &[S]) -> Result<Self, DomainError> {
        let instincts = codes
            .iter()
            .map(|c| c.as_ref().parse::<Instinct>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&instincts)
    }

    #[inline]
    pub fn dominant(&self) -> Instinct {
        self.0[0]
    }

    #[inline]
    pub fn secondary(&self) -> Instinct {
        self.0[1]
    }

    /// The least developed instinct.
    #[inline]
    pub fn blind_spot(&self) -> Instinct {
        self.0[2]
    }

    pub fn as_array(&self) -> [Instinct; 3] {
        self.0
    }

    /// Short label such as `sp/so`.
    pub fn stacking_label(&self) -> String {
        format!("{}/{}", self.0[0], self.0[1])
    }
}

impl Default for InstinctualStack {
    fn default() -> Self {
        Self(Instinct::all())
    }
}

impl TryFrom<Vec<Instinct>> for InstinctualStack {
    type Error = DomainError;

    fn try_from(value: Vec<Instinct>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<InstinctualStack> for Vec<Instinct> {
    fn from(stack: InstinctualStack) -> Self {
        stack.0.to_vec()
    }
}

// ============================================================================
// HealthBand
// ============================================================================

/// Coarse reading of the development level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    /// Levels 1-3
    Healthy,
    /// Levels 4-6
    Average,
    /// Levels 7-9
    Unhealthy,
}

impl HealthBand {
    pub fn from_level(level: u8) -> Self {
        match level {
            0..=3 => Self::Healthy,
            4..=6 => Self::Average,
            _ => Self::Unhealthy,
        }
    }
}

// ============================================================================
// EnneagramProfile
// ============================================================================

/// A character's Enneagram profile.
///
/// # Example
///
/// ```
/// use charsheet_domain::types::EnneagramType;
/// use charsheet_domain::value_objects::EnneagramProfile;
///
/// let mut profile = EnneagramProfile::new(EnneagramType::Investigator);
/// profile.set_wing(Some(EnneagramType::Loyalist)).unwrap();
/// assert_eq!(profile.integration_point(), EnneagramType::Challenger);
///
/// // 7 is not next to 5 on the ring
/// assert!(profile.set_wing(Some(EnneagramType::Enthusiast)).is_err());
/// assert_eq!(profile.wing(), Some(EnneagramType::Loyalist));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnneagramProfile {
    main_type: EnneagramType,
    wing: Option<EnneagramType>,
    instinctual_stack: InstinctualStack,
    development_level: u8,
    self_awareness_level: u8,
    dominant_instinct_strength: f64,
    /// Indexed by type number - 1
    type_affinities: [f64; 9],
    tritype_secondary: Option<EnneagramType>,
    tritype_tertiary: Option<EnneagramType>,
}

impl EnneagramProfile {
    /// Create a profile with neutral defaults for everything but the type.
    pub fn new(main_type: EnneagramType) -> Self {
        Self {
            main_type,
            wing: None,
            instinctual_stack: InstinctualStack::default(),
            development_level: 5,
            self_awareness_level: 5,
            dominant_instinct_strength: 0.5,
            type_affinities: [DEFAULT_AFFINITY; 9],
            tritype_secondary: None,
            tritype_tertiary: None,
        }
    }

    // =========================================================================
    // Validation (single source of truth)
    // =========================================================================

    fn check(&self) -> Result<(), DomainError> {
        if let Some(wing) = self.wing {
            if !self.main_type.is_adjacent(wing) {
                let [a, b] = self.main_type.adjacent_types();
                return Err(DomainError::validation(format!(
                    "Wing {} is not valid for type {} (must be {} or {})",
                    wing, self.main_type, a, b
                )));
            }
        }
        // Re-check the stack so a hand-built array can never slip through
        InstinctualStack::new(&self.instinctual_stack.0)?;
        bounded_level(
            "Development level",
            i64::from(self.development_level),
            MIN_DEVELOPMENT_LEVEL,
            MAX_DEVELOPMENT_LEVEL,
        )?;
        bounded_level(
            "Self-awareness level",
            i64::from(self.self_awareness_level),
            MIN_SELF_AWARENESS,
            MAX_SELF_AWARENESS,
        )?;
        if !(0.0..=1.0).contains(&self.dominant_instinct_strength) {
            return Err(DomainError::validation(format!(
                "Dominant instinct strength must be between 0.0 and 1.0, got {}",
                self.dominant_instinct_strength
            )));
        }
        for ty in EnneagramType::all() {
            let value = self.type_affinity(ty);
            if !(0.0..=1.0).contains(&value) {
                return Err(DomainError::validation(format!(
                    "Affinity for type {} must be between 0.0 and 1.0, got {}",
                    ty, value
                )));
            }
        }
        self.check_tritype()
    }

    fn check_tritype(&self) -> Result<(), DomainError> {
        let main_triad = self.main_type.triad();
        let mut seen: Vec<Triad> = vec![main_triad];
        for (label, entry) in [
            ("secondary", self.tritype_secondary),
            ("tertiary", self.tritype_tertiary),
        ] {
            if let Some(ty) = entry {
                if seen.contains(&ty.triad()) {
                    return Err(DomainError::validation(format!(
                        "Tritype {} type {} shares the {:?} triad with another tritype entry",
                        label,
                        ty,
                        ty.triad()
                    )));
                }
                seen.push(ty.triad());
            }
        }
        Ok(())
    }

    /// Apply `change` to a copy, validate it, and commit only on success.
    fn try_update(&mut self, change: impl FnOnce(&mut Self)) -> Result<(), DomainError> {
        let mut candidate = self.clone();
        change(&mut candidate);
        candidate.check()?;
        *self = candidate;
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn main_type(&self) -> EnneagramType {
        self.main_type
    }

    #[inline]
    pub fn wing(&self) -> Option<EnneagramType> {
        self.wing
    }

    #[inline]
    pub fn instinctual_stack(&self) -> InstinctualStack {
        self.instinctual_stack
    }

    #[inline]
    pub fn development_level(&self) -> u8 {
        self.development_level
    }

    #[inline]
    pub fn self_awareness_level(&self) -> u8 {
        self.self_awareness_level
    }

    #[inline]
    pub fn dominant_instinct_strength(&self) -> f64 {
        self.dominant_instinct_strength
    }

    pub fn type_affinity(&self, ty: EnneagramType) -> f64 {
        self.type_affinities[usize::from(ty.number() - 1)]
    }

    /// All nine affinities in type order.
    pub fn type_affinities(&self) -> impl Iterator<Item = (EnneagramType, f64)> + '_ {
        EnneagramType::all()
            .into_iter()
            .map(move |ty| (ty, self.type_affinity(ty)))
    }

    #[inline]
    pub fn tritype_secondary(&self) -> Option<EnneagramType> {
        self.tritype_secondary
    }

    #[inline]
    pub fn tritype_tertiary(&self) -> Option<EnneagramType> {
        self.tritype_tertiary
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    pub fn integration_point(&self) -> EnneagramType {
        self.main_type.integration_point()
    }

    pub fn disintegration_point(&self) -> EnneagramType {
        self.main_type.disintegration_point()
    }

    pub fn triad(&self) -> Triad {
        self.main_type.triad()
    }

    pub fn health_band(&self) -> HealthBand {
        HealthBand::from_level(self.development_level)
    }

    pub fn dominant_instinct(&self) -> Instinct {
        self.instinctual_stack.dominant()
    }

    /// Type with the highest affinity; ties go to the lower number.
    pub fn strongest_affinity(&self) -> EnneagramType {
        let mut best = EnneagramType::Reformer;
        for (ty, value) in self.type_affinities() {
            if value > self.type_affinity(best) {
                best = ty;
            }
        }
        best
    }

    /// Short label such as `4w5 sp/sx`.
    pub fn label(&self) -> String {
        let core = match self.wing {
            Some(wing) => format!("{}w{}", self.main_type, wing),
            None => self.main_type.to_string(),
        };
        format!("{} {}", core, self.instinctual_stack.stacking_label())
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Change the main type, keeping the current wing.
    ///
    /// Fails if the existing wing or tritype would become invalid; use
    /// `set_main_type_with_wing` to change both together.
    pub fn set_main_type(&mut self, main_type: EnneagramType) -> Result<(), DomainError> {
        self.try_update(|p| p.main_type = main_type)
    }

    pub fn set_main_type_with_wing(
        &mut self,
        main_type: EnneagramType,
        wing: Option<EnneagramType>,
    ) -> Result<(), DomainError> {
        self.try_update(|p| {
            p.main_type = main_type;
            p.wing = wing;
        })
    }

    pub fn set_wing(&mut self, wing: Option<EnneagramType>) -> Result<(), DomainError> {
        self.try_update(|p| p.wing = wing)
    }

    pub fn set_instinctual_stack(&mut self, stack: InstinctualStack) -> Result<(), DomainError> {
        self.try_update(|p| p.instinctual_stack = stack)
    }

    pub fn set_development_level(&mut self, level: u8) -> Result<(), DomainError> {
        self.try_update(|p| p.development_level = level)
    }

    pub fn set_self_awareness_level(&mut self, level: u8) -> Result<(), DomainError> {
        self.try_update(|p| p.self_awareness_level = level)
    }

    pub fn set_dominant_instinct_strength(&mut self, strength: f64) -> Result<(), DomainError> {
        self.try_update(|p| p.dominant_instinct_strength = strength)
    }

    pub fn set_type_affinity(&mut self, ty: EnneagramType, value: f64) -> Result<(), DomainError> {
        self.try_update(|p| p.type_affinities[usize::from(ty.number() - 1)] = value)
    }

    pub fn set_tritype(
        &mut self,
        secondary: Option<EnneagramType>,
        tertiary: Option<EnneagramType>,
    ) -> Result<(), DomainError> {
        self.try_update(|p| {
            p.tritype_secondary = secondary;
            p.tritype_tertiary = tertiary;
        })
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_wing(mut self, wing: EnneagramType) -> Result<Self, DomainError> {
        self.set_wing(Some(wing))?;
        Ok(self)
    }
}

impl Default for EnneagramProfile {
    fn default() -> Self {
        Self::new(EnneagramType::Peacemaker)
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Wire format of the `enneagram` object.
///
/// Plain numbers and strings only; `EnneagramProfile::try_from` does every
/// range and consistency check. Affinity keys are the type numbers as
/// strings (`"1"`..`"9"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnneagramWireFormat {
    pub main_type: i64,
    #[serde(default)]
    pub wing: Option<i64>,
    #[serde(default = "default_stack")]
    pub instinctual_stack: Vec<String>,
    #[serde(default = "default_mid_level")]
    pub development_level: i64,
    #[serde(default)]
    pub integration_point: Option<i64>,
    #[serde(default)]
    pub disintegration_point: Option<i64>,
    #[serde(default)]
    pub type_affinities: BTreeMap<String, f64>,
    #[serde(default)]
    pub tritype_secondary: Option<i64>,
    #[serde(default)]
    pub tritype_tertiary: Option<i64>,
    #[serde(default = "default_strength")]
    pub dominant_instinct_strength: f64,
    #[serde(default = "default_mid_level")]
    pub self_awareness_level: i64,
}

fn default_stack() -> Vec<String> {
    Instinct::all().iter().map(|i| i.as_str().to_string()).collect()
}

fn default_mid_level() -> i64 {
    5
}

fn default_strength() -> f64 {
    0.5
}

impl Default for EnneagramWireFormat {
    fn default() -> Self {
        Self::from(&EnneagramProfile::default())
    }
}

impl From<&EnneagramProfile> for EnneagramWireFormat {
    fn from(profile: &EnneagramProfile) -> Self {
        let number = |ty: EnneagramType| i64::from(ty.number());
        Self {
            main_type: number(profile.main_type),
            wing: profile.wing.map(number),
            instinctual_stack: profile
                .instinctual_stack
                .as_array()
                .iter()
                .map(|i| i.as_str().to_string())
                .collect(),
            development_level: i64::from(profile.development_level),
            integration_point: Some(number(profile.integration_point())),
            disintegration_point: Some(number(profile.disintegration_point())),
            type_affinities: profile
                .type_affinities()
                .map(|(ty, v)| (ty.number().to_string(), v))
                .collect(),
            tritype_secondary: profile.tritype_secondary.map(number),
            tritype_tertiary: profile.tritype_tertiary.map(number),
            dominant_instinct_strength: profile.dominant_instinct_strength,
            self_awareness_level: i64::from(profile.self_awareness_level),
        }
    }
}

impl TryFrom<EnneagramWireFormat> for EnneagramProfile {
    type Error = DomainError;

    fn try_from(wire: EnneagramWireFormat) -> Result<Self, Self::Error> {
        let main_type = type_from_wire("Enneagram main type", wire.main_type)?;
        let mut profile = EnneagramProfile::new(main_type);

        if let Some(stored) = wire.integration_point {
            let stored = type_from_wire("Integration point", stored)?;
            if stored != profile.integration_point() {
                return Err(DomainError::validation(format!(
                    "Integration point {} does not match type {} (expected {})",
                    stored,
                    main_type,
                    profile.integration_point()
                )));
            }
        }
        if let Some(stored) = wire.disintegration_point {
            let stored = type_from_wire("Disintegration point", stored)?;
            if stored != profile.disintegration_point() {
                return Err(DomainError::validation(format!(
                    "Disintegration point {} does not match type {} (expected {})",
                    stored,
                    main_type,
                    profile.disintegration_point()
                )));
            }
        }

        for (key, value) in &wire.type_affinities {
            let ty: EnneagramType = key
                .parse()
                .map_err(|_| DomainError::validation(format!("Unknown affinity key '{}'", key)))?;
            profile.type_affinities[usize::from(ty.number() - 1)] = *value;
        }
        profile.wing = wire.wing.map(|w| type_from_wire("Wing", w)).transpose()?;
        profile.instinctual_stack = InstinctualStack::parse(&wire.instinctual_stack)?;
        profile.development_level = bounded_level(
            "Development level",
            wire.development_level,
            MIN_DEVELOPMENT_LEVEL,
            MAX_DEVELOPMENT_LEVEL,
        )?;
        profile.self_awareness_level = bounded_level(
            "Self-awareness level",
            wire.self_awareness_level,
            MIN_SELF_AWARENESS,
            MAX_SELF_AWARENESS,
        )?;
        profile.dominant_instinct_strength = wire.dominant_instinct_strength;
        profile.tritype_secondary = wire
            .tritype_secondary
            .map(|t| type_from_wire("Tritype secondary", t))
            .transpose()?;
        profile.tritype_tertiary = wire
            .tritype_tertiary
            .map(|t| type_from_wire("Tritype tertiary", t))
            .transpose()?;

        profile.check()?;
        Ok(profile)
    }
}

impl Serialize for EnneagramProfile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        EnneagramWireFormat::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EnneagramProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = EnneagramWireFormat::deserialize(deserializer)?;
        EnneagramProfile::try_from(wire).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn t(n: u8) -> EnneagramType {
        EnneagramType::from_number(n).unwrap()
    }

    mod wing {
        use super::*;

        #[test]
        fn only_adjacent_wings_are_accepted_for_every_type() {
            for main in EnneagramType::all() {
                for candidate in EnneagramType::all() {
                    let result = EnneagramProfile::new(main).with_wing(candidate);
                    assert_eq!(
                        result.is_ok(),
                        main.adjacent_types().contains(&candidate),
                        "{}w{}",
                        main,
                        candidate
                    );
                }
            }
        }

        #[test]
        fn rejected_wing_leaves_profile_unchanged() {
            let mut profile = EnneagramProfile::new(t(1)).with_wing(t(9)).unwrap();
            let err = profile.set_wing(Some(t(5))).unwrap_err();
            assert!(err.message().contains("must be 9 or 2"));
            assert_eq!(profile.wing(), Some(t(9)));
        }

        #[test]
        fn clearing_wing_is_allowed() {
            let mut profile = EnneagramProfile::new(t(4)).with_wing(t(5)).unwrap();
            profile.set_wing(None).unwrap();
            assert_eq!(profile.wing(), None);
        }

        #[test]
        fn main_type_change_fails_when_wing_would_dangle() {
            let mut profile = EnneagramProfile::new(t(4)).with_wing(t(5)).unwrap();
            assert!(profile.set_main_type(t(8)).is_err());
            assert_eq!(profile.main_type(), t(4));

            profile.set_main_type(t(6)).unwrap();
            assert_eq!(profile.main_type(), t(6));
            assert_eq!(profile.integration_point(), t(9));

            profile.set_main_type_with_wing(t(8), Some(t(7))).unwrap();
            assert_eq!(profile.label(), "8w7 sp/so");
        }
    }

    mod instincts {
        use super::*;

        #[test]
        fn stack_must_be_a_permutation() {
            assert!(InstinctualStack::parse(&["sx", "so", "sp"]).is_ok());
            let dup = InstinctualStack::parse(&["sp", "sp", "so"]).unwrap_err();
            assert!(dup.message().contains("missing 'sx'"));
            assert!(InstinctualStack::parse(&["sp", "so"]).is_err());
            assert!(InstinctualStack::parse(&["sp", "so", "sx", "sp"]).is_err());
        }

        #[test]
        fn stack_deserialization_is_validated() {
            assert!(serde_json::from_str::<InstinctualStack>(r#"["so","so","sx"]"#).is_err());
            let stack: InstinctualStack = serde_json::from_str(r#"["sx","sp","so"]"#).unwrap();
            assert_eq!(stack.dominant(), Instinct::Sexual);
            assert_eq!(stack.blind_spot(), Instinct::Social);
        }
    }

    mod ranges {
        use super::*;

        #[test]
        fn development_level_bounds() {
            let mut profile = EnneagramProfile::default();
            assert!(profile.set_development_level(0).is_err());
            assert!(profile.set_development_level(10).is_err());
            profile.set_development_level(2).unwrap();
            assert_eq!(profile.health_band(), HealthBand::Healthy);
            profile.set_development_level(8).unwrap();
            assert_eq!(profile.health_band(), HealthBand::Unhealthy);
        }

        #[test]
        fn self_awareness_and_strength_bounds() {
            let mut profile = EnneagramProfile::default();
            assert!(profile.set_self_awareness_level(11).is_err());
            assert!(profile.set_dominant_instinct_strength(1.5).is_err());
            assert!(profile.set_dominant_instinct_strength(f64::NAN).is_err());
            profile.set_dominant_instinct_strength(1.0).unwrap();
            assert_eq!(profile.dominant_instinct_strength(), 1.0);
        }

        #[test]
        fn affinities_default_to_half_and_are_bounded() {
            let mut profile = EnneagramProfile::default();
            assert!(profile.type_affinities().all(|(_, v)| v == DEFAULT_AFFINITY));
            assert!(profile.set_type_affinity(t(3), -0.1).is_err());
            profile.set_type_affinity(t(3), 0.9).unwrap();
            assert_eq!(profile.strongest_affinity(), t(3));
        }
    }

    mod tritype {
        use super::*;

        #[test]
        fn tritype_needs_one_type_per_center() {
            let mut profile = EnneagramProfile::new(t(4));
            profile.set_tritype(Some(t(5)), Some(t(1))).unwrap();
            assert!(profile.set_tritype(Some(t(3)), None).is_err());
            assert!(profile.set_tritype(Some(t(5)), Some(t(7))).is_err());
            assert_eq!(profile.tritype_secondary(), Some(t(5)));
        }
    }

    mod serde_format {
        use super::*;

        #[test]
        fn roundtrip_preserves_everything() {
            let mut profile = EnneagramProfile::new(t(7)).with_wing(t(8)).unwrap();
            profile
                .set_instinctual_stack(InstinctualStack::parse(&["so", "sx", "sp"]).unwrap())
                .unwrap();
            profile.set_development_level(3).unwrap();
            profile.set_self_awareness_level(9).unwrap();
            profile.set_dominant_instinct_strength(0.8).unwrap();
            profile.set_type_affinity(t(2), 0.1).unwrap();
            profile.set_tritype(Some(t(2)), Some(t(9))).unwrap();

            let json = serde_json::to_value(&profile).unwrap();
            assert_eq!(json["main_type"], 7);
            assert_eq!(json["integration_point"], 5);
            assert_eq!(json["disintegration_point"], 1);
            assert_eq!(json["type_affinities"]["2"], 0.1);
            assert_eq!(json["instinctual_stack"], serde_json::json!(["so", "sx", "sp"]));

            let parsed: EnneagramProfile = serde_json::from_value(json).unwrap();
            assert_eq!(parsed, profile);
        }

        #[test]
        fn inconsistent_stored_points_are_rejected() {
            let json = serde_json::json!({
                "main_type": 1,
                "integration_point": 4,
            });
            let err = serde_json::from_value::<EnneagramProfile>(json).unwrap_err();
            assert!(err.to_string().contains("Integration point"));
        }

        #[test]
        fn invalid_wing_in_file_is_rejected() {
            let json = serde_json::json!({"main_type": 2, "wing": 6});
            assert!(serde_json::from_value::<EnneagramProfile>(json).is_err());
        }

        #[test]
        fn minimal_object_takes_defaults() {
            let parsed: EnneagramProfile =
                serde_json::from_value(serde_json::json!({"main_type": 9})).unwrap();
            assert_eq!(parsed, EnneagramProfile::new(t(9)));
        }
    }
}
