//! NarrativeEvent entity - one entry on a character's timeline
//!
//! # Invariants
//!
//! - `title` is non-empty and <= 200 characters (enforced by `EventTitle`)
//! - `importance` is in `[1, 10]`
//! - `description` is <= 5000 characters (enforced by `Description`)
//! - `date` is free text, trimmed, <= 100 characters; it is never rejected
//!   for being unparseable (see `crate::timeline`)
//! - `tags` are distinct, in first-added order

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::common::push_unique;
use crate::error::DomainError;
use crate::ids::NarrativeEventId;
use crate::timeline::{timeline_key, TimelineKey};
use crate::value_objects::{Description, EventTitle, Tag, MAX_LABEL_LENGTH};

pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 10;
pub const DEFAULT_IMPORTANCE: u8 = 5;

/// Validate an event importance.
pub fn check_importance(importance: i64) -> Result<u8, DomainError> {
    if importance < i64::from(MIN_IMPORTANCE) || importance > i64::from(MAX_IMPORTANCE) {
        return Err(DomainError::validation(format!(
            "Event importance must be between {} and {}, got {}",
            MIN_IMPORTANCE, MAX_IMPORTANCE, importance
        )));
    }
    // Range checked above
    Ok(importance as u8)
}

fn check_date(date: &str) -> Result<String, DomainError> {
    let date = date.trim();
    if date.chars().count() > MAX_LABEL_LENGTH {
        return Err(DomainError::validation(format!(
            "Event date cannot exceed {} characters",
            MAX_LABEL_LENGTH
        )));
    }
    Ok(date.to_string())
}

/// A dated (or undated) happening in a character's story.
///
/// # Example
///
/// ```
/// use charsheet_domain::entities::NarrativeEvent;
/// use charsheet_domain::value_objects::EventTitle;
///
/// let event = NarrativeEvent::new(EventTitle::new("Left home").unwrap())
///     .with_date("Age 16")
///     .unwrap()
///     .with_importance(8)
///     .unwrap();
///
/// assert_eq!(event.importance(), 8);
/// assert!(event.timeline_key().is_dated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeEvent {
    id: NarrativeEventId,
    title: EventTitle,
    description: Description,
    date: String,
    importance: u8,
    tags: Vec<Tag>,
}

impl NarrativeEvent {
    /// Create an undated event of default importance with a fresh id.
    pub fn new(title: EventTitle) -> Self {
        Self {
            id: NarrativeEventId::new(),
            title,
            description: Description::empty(),
            date: String::new(),
            importance: DEFAULT_IMPORTANCE,
            tags: Vec::new(),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_id(mut self, id: NarrativeEventId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = description;
        self
    }

    pub fn with_date(mut self, date: impl AsRef<str>) -> Result<Self, DomainError> {
        self.set_date(date)?;
        Ok(self)
    }

    pub fn with_importance(mut self, importance: i64) -> Result<Self, DomainError> {
        self.set_importance(importance)?;
        Ok(self)
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &NarrativeEventId {
        &self.id
    }

    #[inline]
    pub fn title(&self) -> &EventTitle {
        &self.title
    }

    #[inline]
    pub fn description(&self) -> &Description {
        &self.description
    }

    #[inline]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[inline]
    pub fn importance(&self) -> u8 {
        self.importance
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag.trim())
    }

    /// Sort key derived from `date` and `importance`.
    pub fn timeline_key(&self) -> TimelineKey {
        timeline_key(&self.date, self.importance)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    pub fn set_title(&mut self, title: EventTitle) {
        self.title = title;
    }

    pub fn set_description(&mut self, description: Description) {
        self.description = description;
    }

    pub fn set_date(&mut self, date: impl AsRef<str>) -> Result<(), DomainError> {
        self.date = check_date(date.as_ref())?;
        Ok(())
    }

    pub fn set_importance(&mut self, importance: i64) -> Result<(), DomainError> {
        self.importance = check_importance(importance)?;
        Ok(())
    }

    /// Returns `false` if the tag was already present.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        push_unique(&mut self.tags, tag)
    }

    /// Returns `false` if the tag was not present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.as_str() != tag.trim());
        self.tags.len() != before
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Wire format: `{character_id, title, description, date, importance, tags}`
///
/// The event id is stored under `character_id` for compatibility with
/// existing files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeEventWireFormat {
    pub character_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default = "default_importance")]
    pub importance: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_importance() -> i64 {
    i64::from(DEFAULT_IMPORTANCE)
}

impl From<&NarrativeEvent> for NarrativeEventWireFormat {
    fn from(event: &NarrativeEvent) -> Self {
        Self {
            character_id: event.id.to_string(),
            title: event.title.to_string(),
            description: event.description.to_string(),
            date: event.date.clone(),
            importance: i64::from(event.importance),
            tags: event.tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl TryFrom<NarrativeEventWireFormat> for NarrativeEvent {
    type Error = DomainError;

    fn try_from(wire: NarrativeEventWireFormat) -> Result<Self, Self::Error> {
        let id = NarrativeEventId::try_from(wire.character_id)
            .map_err(|_| DomainError::validation("Event id cannot be empty"))?;
        let tags = wire
            .tags
            .into_iter()
            .map(Tag::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NarrativeEvent::new(EventTitle::new(wire.title)?)
            .with_id(id)
            .with_description(Description::new(wire.description)?)
            .with_date(&wire.date)?
            .with_importance(wire.importance)?
            .with_tags(tags))
    }
}

impl Serialize for NarrativeEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NarrativeEventWireFormat::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NarrativeEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = NarrativeEventWireFormat::deserialize(deserializer)?;
        NarrativeEvent::try_from(wire).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::KeyConfidence;

    fn battle() -> NarrativeEvent {
        NarrativeEvent::new(EventTitle::new("Battle of the Ford").unwrap())
    }

    #[test]
    fn defaults_are_undated_and_mid_importance() {
        let event = battle();
        assert_eq!(event.importance(), DEFAULT_IMPORTANCE);
        assert_eq!(event.date(), "");
        assert_eq!(event.timeline_key().confidence(), KeyConfidence::Undated);
    }

    #[test]
    fn importance_is_bounded() {
        assert!(battle().with_importance(10).is_ok());
        let err = battle().with_importance(11).unwrap_err();
        assert_eq!(
            err.message(),
            "Event importance must be between 1 and 10, got 11"
        );
        let mut event = battle();
        assert!(event.set_importance(0).is_err());
        assert_eq!(event.importance(), DEFAULT_IMPORTANCE);
    }

    #[test]
    fn date_is_trimmed_and_bounded() {
        let event = battle().with_date("  1201-03-04 ").unwrap();
        assert_eq!(event.date(), "1201-03-04");
        assert!(battle().with_date("x".repeat(MAX_LABEL_LENGTH + 1)).is_err());
    }

    #[test]
    fn tags_are_deduplicated() {
        let mut event = battle().with_tags([Tag::new("war").unwrap(), Tag::new("war ").unwrap()]);
        assert_eq!(event.tags().len(), 1);
        assert!(event.add_tag(Tag::new("loss").unwrap()));
        assert!(!event.add_tag(Tag::new("loss").unwrap()));
        assert!(event.has_tag("loss"));
        assert!(event.remove_tag("war"));
        assert!(!event.remove_tag("war"));
        assert_eq!(event.tags().len(), 1);
    }

    #[test]
    fn wire_format_roundtrip() {
        let event = battle()
            .with_date("Age 19")
            .unwrap()
            .with_importance(9)
            .unwrap()
            .with_description(Description::new("Lost an eye").unwrap())
            .with_tags([Tag::new("war").unwrap()]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["character_id"], event.id().to_string());
        assert_eq!(json["importance"], 9);
        assert_eq!(json["tags"], serde_json::json!(["war"]));

        let parsed: NarrativeEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn minimal_wire_object_takes_defaults() {
        let json = serde_json::json!({"character_id": "evt-born", "title": "Born"});
        let parsed: NarrativeEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.id().as_str(), "evt-born");
        assert_eq!(parsed.importance(), DEFAULT_IMPORTANCE);
        assert!(parsed.tags().is_empty());
    }

    #[test]
    fn invalid_wire_values_are_validation_errors() {
        let wire = NarrativeEventWireFormat {
            character_id: NarrativeEventId::new().to_string(),
            title: "   ".into(),
            description: String::new(),
            date: String::new(),
            importance: 5,
            tags: Vec::new(),
        };
        let err = NarrativeEvent::try_from(wire).unwrap_err();
        assert_eq!(err.message(), "Event title cannot be empty");
    }
}
