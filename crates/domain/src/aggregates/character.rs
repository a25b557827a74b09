//! Character aggregate - the root of a character sheet
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: all state is reached through accessors
//! - **Newtypes**: names, prose, and bounded numbers are validated types
//! - **Outcome enums**: mutations report what happened (`RelationshipUpsert`,
//!   `CharacterUpdate`)
//! - **Injected time**: every mutation takes `now` and refreshes `updated_at`
//!
//! # Serialized form
//!
//! `CharacterRecord` is the on-disk shape: plain strings and numbers with
//! serde defaults for optional keys. `Character::from_record` runs every
//! domain check on it, so a record either becomes a fully valid `Character`
//! or produces the first `DomainError` encountered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::common::{format_datetime, parse_datetime, push_unique, some_if_not_empty};
use crate::entities::{NarrativeEvent, NarrativeEventWireFormat};
use crate::error::DomainError;
use crate::events::{CharacterUpdate, RelationshipUpsert};
use crate::ids::{CharacterId, NarrativeEventId};
use crate::timeline::{insertion_index, sort_events};
use crate::types::RelationshipType;
use crate::value_objects::{
    Ability, Affiliation, Biography, CharacterName, CharacterStats, EnneagramProfile,
    EnneagramWireFormat, Level, Notes, Relationship, RelationshipWireFormat, StatsWireFormat,
    Tag,
};

/// Version string written into new records.
pub const CHARACTER_FORMAT_VERSION: &str = "1.0";

/// A player or non-player character sheet.
///
/// # Invariants
///
/// - every field holds a validated value; there is no way to observe an
///   invalid `Character`
/// - at most one relationship per target character
/// - `narrative_events` is in timeline order (see `crate::timeline`)
/// - affiliations and tags contain no duplicates
/// - `updated_at >= created_at` as long as callers pass a monotonic `now`
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use charsheet_domain::aggregates::Character;
/// use charsheet_domain::value_objects::{Ability, CharacterName};
///
/// let now = Utc::now();
/// let mut hero = Character::new(CharacterName::new("Aria").unwrap(), now);
/// hero.set_stat(Ability::Strength, 16, now).unwrap();
///
/// assert_eq!(hero.stats().strength(), 16);
/// assert!(hero.set_stat(Ability::Strength, 26, now).is_err());
/// assert_eq!(hero.stats().strength(), 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    // Identity
    id: CharacterId,

    // Core attributes
    name: CharacterName,
    level: Level,
    image_data: Option<String>,

    // Sheet sections
    enneagram: EnneagramProfile,
    stats: CharacterStats,
    biography: Biography,
    affiliations: Vec<Affiliation>,
    relationships: Vec<Relationship>,
    narrative_events: Vec<NarrativeEvent>,
    tags: Vec<Tag>,
    notes: Notes,

    // Bookkeeping
    version: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Character {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a level 1 character with default stats and profile.
    pub fn new(name: CharacterName, now: DateTime<Utc>) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            level: Level::first(),
            image_data: None,
            enneagram: EnneagramProfile::default(),
            stats: CharacterStats::default(),
            biography: Biography::empty(),
            affiliations: Vec::new(),
            relationships: Vec::new(),
            narrative_events: Vec::new(),
            tags: Vec::new(),
            notes: Notes::default(),
            version: CHARACTER_FORMAT_VERSION.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A blank sheet named "New Character".
    pub fn new_default(now: DateTime<Utc>) -> Self {
        Self::new(CharacterName::placeholder(), now)
    }

    /// A copy with a fresh id and both timestamps set to `now`.
    pub fn duplicate(&self, now: DateTime<Utc>) -> Self {
        Self {
            id: CharacterId::new(),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &CharacterId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Base64-encoded portrait, if one is attached.
    #[inline]
    pub fn image_data(&self) -> Option<&str> {
        self.image_data.as_deref()
    }

    #[inline]
    pub fn enneagram(&self) -> &EnneagramProfile {
        &self.enneagram
    }

    #[inline]
    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    #[inline]
    pub fn biography(&self) -> &Biography {
        &self.biography
    }

    #[inline]
    pub fn affiliations(&self) -> &[Affiliation] {
        &self.affiliations
    }

    #[inline]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Events in timeline order.
    #[inline]
    pub fn narrative_events(&self) -> &[NarrativeEvent] {
        &self.narrative_events
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[inline]
    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn find_relationship(&self, target_id: &CharacterId) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|r| r.target_id() == target_id)
    }

    pub fn relationships_of_type(
        &self,
        relationship_type: RelationshipType,
    ) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .iter()
            .filter(move |r| r.relationship_type() == relationship_type)
    }

    pub fn positive_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(|r| r.is_positive())
    }

    pub fn find_event(&self, id: &NarrativeEventId) -> Option<&NarrativeEvent> {
        self.narrative_events.iter().find(|e| e.id() == id)
    }

    // =========================================================================
    // Core attribute mutation
    // =========================================================================

    /// Record a modification made outside the aggregate's own setters.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn set_name(&mut self, name: CharacterName, now: DateTime<Utc>) -> CharacterUpdate {
        self.touch(now);
        if name == self.name {
            return CharacterUpdate::Unchanged;
        }
        let from = std::mem::replace(&mut self.name, name.clone());
        CharacterUpdate::NameChanged { from, to: name }
    }

    pub fn set_level(&mut self, level: Level, now: DateTime<Utc>) -> CharacterUpdate {
        self.touch(now);
        if level == self.level {
            return CharacterUpdate::Unchanged;
        }
        let from = std::mem::replace(&mut self.level, level);
        CharacterUpdate::LevelChanged { from, to: level }
    }

    /// Advance one level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` at the maximum level; nothing changes.
    pub fn level_up(&mut self, now: DateTime<Utc>) -> Result<Level, DomainError> {
        let next = self.level.next()?;
        self.set_level(next, now);
        Ok(next)
    }

    pub fn set_biography(&mut self, biography: Biography, now: DateTime<Utc>) {
        self.biography = biography;
        self.touch(now);
    }

    pub fn set_notes(&mut self, notes: Notes, now: DateTime<Utc>) {
        self.notes = notes;
        self.touch(now);
    }

    /// Attach or clear the base64 portrait. An empty string clears it.
    pub fn set_image_data(&mut self, image_data: Option<String>, now: DateTime<Utc>) {
        self.image_data = image_data.and_then(some_if_not_empty);
        self.touch(now);
    }

    // =========================================================================
    // Stats and profile
    // =========================================================================

    pub fn set_stat(
        &mut self,
        ability: Ability,
        value: i32,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.stats.set(ability, value)?;
        self.touch(now);
        Ok(())
    }

    pub fn set_stats(&mut self, stats: CharacterStats, now: DateTime<Utc>) {
        self.stats = stats;
        self.touch(now);
    }

    pub fn set_enneagram(&mut self, profile: EnneagramProfile, now: DateTime<Utc>) {
        self.enneagram = profile;
        self.touch(now);
    }

    /// Apply several profile changes at once; none are kept if any fails.
    ///
    /// ```
    /// use chrono::Utc;
    /// use charsheet_domain::aggregates::Character;
    /// use charsheet_domain::types::EnneagramType;
    ///
    /// let now = Utc::now();
    /// let mut c = Character::new_default(now);
    /// let result = c.update_enneagram(now, |p| {
    ///     p.set_development_level(2)?;
    ///     p.set_wing(Some(EnneagramType::Enthusiast)) // not next to 9
    /// });
    /// assert!(result.is_err());
    /// assert_eq!(c.enneagram().development_level(), 5);
    /// ```
    pub fn update_enneagram<F>(&mut self, now: DateTime<Utc>, change: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut EnneagramProfile) -> Result<(), DomainError>,
    {
        let mut candidate = self.enneagram.clone();
        change(&mut candidate)?;
        self.enneagram = candidate;
        self.touch(now);
        Ok(())
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    /// Add a relationship, or overwrite the existing one for the same target.
    ///
    /// An existing entry keeps its position in the list.
    pub fn add_relationship(
        &mut self,
        relationship: Relationship,
        now: DateTime<Utc>,
    ) -> RelationshipUpsert {
        self.touch(now);
        match self
            .relationships
            .iter_mut()
            .find(|r| r.target_id() == relationship.target_id())
        {
            Some(existing) => {
                let previous = existing.clone();
                existing.merge_from(relationship);
                RelationshipUpsert::Updated { previous }
            }
            None => {
                self.relationships.push(relationship);
                RelationshipUpsert::Added
            }
        }
    }

    /// Edit the relationship with `target_id` in place.
    ///
    /// Returns `Ok(false)` if there is no such relationship. If `change`
    /// fails the relationship is left as it was.
    pub fn update_relationship<F>(
        &mut self,
        target_id: &CharacterId,
        now: DateTime<Utc>,
        change: F,
    ) -> Result<bool, DomainError>
    where
        F: FnOnce(&mut Relationship) -> Result<(), DomainError>,
    {
        let Some(slot) = self
            .relationships
            .iter_mut()
            .find(|r| r.target_id() == target_id)
        else {
            return Ok(false);
        };
        let mut candidate = slot.clone();
        change(&mut candidate)?;
        slot.merge_from(candidate);
        self.touch(now);
        Ok(true)
    }

    /// Returns `false` if no relationship with `target_id` exists.
    pub fn remove_relationship(&mut self, target_id: &CharacterId, now: DateTime<Utc>) -> bool {
        let before = self.relationships.len();
        self.relationships.retain(|r| r.target_id() != target_id);
        let removed = self.relationships.len() != before;
        if removed {
            self.touch(now);
        }
        removed
    }

    // =========================================================================
    // Narrative events
    // =========================================================================

    /// Insert an event at its timeline position and return that index.
    ///
    /// Events whose keys tie with existing ones go after them.
    pub fn add_event(&mut self, event: NarrativeEvent, now: DateTime<Utc>) -> usize {
        let index = insertion_index(&self.narrative_events, event.timeline_key());
        self.narrative_events.insert(index, event);
        self.touch(now);
        index
    }

    /// Edit an event and move it to its new timeline position.
    ///
    /// Returns `Ok(false)` if there is no such event. If `change` fails the
    /// event is left as it was.
    pub fn update_event<F>(
        &mut self,
        id: &NarrativeEventId,
        now: DateTime<Utc>,
        change: F,
    ) -> Result<bool, DomainError>
    where
        F: FnOnce(&mut NarrativeEvent) -> Result<(), DomainError>,
    {
        let Some(position) = self.narrative_events.iter().position(|e| e.id() == id) else {
            return Ok(false);
        };
        let mut candidate = self.narrative_events[position].clone();
        change(&mut candidate)?;
        self.narrative_events.remove(position);
        self.add_event(candidate, now);
        Ok(true)
    }

    /// Returns `false` if no event with `id` exists.
    pub fn remove_event(&mut self, id: &NarrativeEventId, now: DateTime<Utc>) -> bool {
        let before = self.narrative_events.len();
        self.narrative_events.retain(|e| e.id() != id);
        let removed = self.narrative_events.len() != before;
        if removed {
            self.touch(now);
        }
        removed
    }

    // =========================================================================
    // Affiliations and tags
    // =========================================================================

    /// Returns `false` if the affiliation was already present.
    pub fn add_affiliation(&mut self, affiliation: Affiliation, now: DateTime<Utc>) -> bool {
        let added = push_unique(&mut self.affiliations, affiliation);
        if added {
            self.touch(now);
        }
        added
    }

    pub fn remove_affiliation(&mut self, affiliation: &str, now: DateTime<Utc>) -> bool {
        let before = self.affiliations.len();
        self.affiliations
            .retain(|a| a.as_str() != affiliation.trim());
        let removed = self.affiliations.len() != before;
        if removed {
            self.touch(now);
        }
        removed
    }

    /// Returns `false` if the tag was already present.
    pub fn add_tag(&mut self, tag: Tag, now: DateTime<Utc>) -> bool {
        let added = push_unique(&mut self.tags, tag);
        if added {
            self.touch(now);
        }
        added
    }

    pub fn remove_tag(&mut self, tag: &str, now: DateTime<Utc>) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.as_str() != tag.trim());
        let removed = self.tags.len() != before;
        if removed {
            self.touch(now);
        }
        removed
    }

    // =========================================================================
    // Record conversion
    // =========================================================================

    /// The serialized form, as written to disk.
    pub fn to_record(&self) -> CharacterRecord {
        CharacterRecord {
            character_id: self.id.to_string(),
            name: self.name.to_string(),
            level: i64::from(self.level.value()),
            image_data: self.image_data.clone(),
            enneagram: EnneagramWireFormat::from(&self.enneagram),
            stats: StatsWireFormat::from(self.stats),
            biography: self.biography.to_string(),
            affiliations: self.affiliations.iter().map(|a| a.to_string()).collect(),
            relationships: self
                .relationships
                .iter()
                .map(RelationshipWireFormat::from)
                .collect(),
            narrative_events: self
                .narrative_events
                .iter()
                .map(NarrativeEventWireFormat::from)
                .collect(),
            created_at: Some(format_datetime(self.created_at)),
            updated_at: Some(format_datetime(self.updated_at)),
            version: self.version.clone(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            notes: self.notes.as_str().to_string(),
        }
    }

    /// Build a character from its serialized form.
    ///
    /// Missing timestamps become `now`. Repeated relationship targets are
    /// merged the way `add_relationship` merges them, and events are put
    /// into timeline order.
    ///
    /// # Errors
    ///
    /// Returns the first `DomainError` found, checking in this order: id,
    /// name, level, biography, stats, relationships, events, enneagram,
    /// affiliations, tags, notes, timestamps.
    pub fn from_record(record: CharacterRecord, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let id = CharacterId::try_from(record.character_id)
            .map_err(|_| DomainError::validation("character_id cannot be empty"))?;
        let name = CharacterName::new(record.name)?;
        let level = Level::new(record.level)?;
        let biography = Biography::new(record.biography)?;
        let stats = CharacterStats::try_from(record.stats)?;

        let mut relationships: Vec<Relationship> = Vec::with_capacity(record.relationships.len());
        for wire in record.relationships {
            let relationship = Relationship::try_from(wire)?;
            match relationships
                .iter_mut()
                .find(|r| r.target_id() == relationship.target_id())
            {
                Some(existing) => existing.merge_from(relationship),
                None => relationships.push(relationship),
            }
        }

        let mut narrative_events = record
            .narrative_events
            .into_iter()
            .map(NarrativeEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        sort_events(&mut narrative_events);

        let enneagram = EnneagramProfile::try_from(record.enneagram)?;

        let mut affiliations = Vec::new();
        for raw in record.affiliations {
            push_unique(&mut affiliations, Affiliation::new(raw)?);
        }
        let mut tags = Vec::new();
        for raw in record.tags {
            push_unique(&mut tags, Tag::new(raw)?);
        }
        let notes = Notes::new(record.notes)?;

        let created_at = timestamp_or("created_at", record.created_at.as_deref(), now)?;
        let updated_at = timestamp_or("updated_at", record.updated_at.as_deref(), now)?;

        let version = if record.version.trim().is_empty() {
            CHARACTER_FORMAT_VERSION.to_string()
        } else {
            record.version
        };

        Ok(Self {
            id,
            name,
            level,
            image_data: record.image_data.and_then(some_if_not_empty),
            enneagram,
            stats,
            biography,
            affiliations,
            relationships,
            narrative_events,
            tags,
            notes,
            version,
            created_at,
            updated_at,
        })
    }
}

fn timestamp_or(
    field: &str,
    raw: Option<&str>,
    default: DateTime<Utc>,
) -> Result<DateTime<Utc>, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(text) => parse_datetime(text).map_err(|_| {
            DomainError::validation(format!("{} '{}' is not a valid timestamp", field, text))
        }),
    }
}

// ============================================================================
// Serialized form
// ============================================================================

/// On-disk shape of a character.
///
/// Only `character_id` and `name` are required; every other key has a
/// default. Unknown keys are ignored. Values are not validated here; use
/// `Character::from_record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub character_id: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub enneagram: EnneagramWireFormat,
    #[serde(default)]
    pub stats: StatsWireFormat,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub affiliations: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<RelationshipWireFormat>,
    #[serde(default)]
    pub narrative_events: Vec<NarrativeEventWireFormat>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

fn default_level() -> i64 {
    1
}

fn default_version() -> String {
    CHARACTER_FORMAT_VERSION.to_string()
}

impl Serialize for Character {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_record().serialize(serializer)
    }
}

// ============================================================================
// Tests
// ============================================================================
