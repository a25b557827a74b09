//! Validated text newtypes for domain entities
//!
//! These newtypes ensure that text fields are valid by construction:
//! - Non-empty where a label is required
//! - Within length limits (counted in characters, not bytes)
//! - Trimmed of leading/trailing whitespace for single-line labels
//!
//! Free-form prose (biography, descriptions) is stored as written.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for character and relationship-target names
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for a character biography
pub const MAX_BIOGRAPHY_LENGTH: usize = 10_000;

/// Maximum length for narrative event descriptions
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Maximum length for relationship descriptions
pub const MAX_RELATIONSHIP_DESCRIPTION_LENGTH: usize = 1_000;

/// Maximum length for narrative event titles
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for tags and affiliations
pub const MAX_LABEL_LENGTH: usize = 100;

fn required_label(kind: &str, value: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", kind)));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            kind, max
        )));
    }
    Ok(trimmed.to_string())
}

fn bounded_text(kind: &str, value: String, max: usize) -> Result<String, DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            kind, max
        )));
    }
    Ok(value)
}

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character name (non-empty, <=100 chars, trimmed)
///
/// Also used for the display name stored on a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 100 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        required_label("Character name", &name.into(), MAX_NAME_LENGTH).map(Self)
    }

    /// Name given to freshly created characters.
    pub(crate) fn placeholder() -> Self {
        Self(String::from("New Character"))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

// ============================================================================
// Biography
// ============================================================================

/// A validated biography (may be empty, <=10000 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Biography(String);

impl Biography {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the text exceeds 10000 characters.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        bounded_text("Biography", text.into(), MAX_BIOGRAPHY_LENGTH).map(Self)
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Biography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Biography {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Biography> for String {
    fn from(bio: Biography) -> String {
        bio.0
    }
}

// ============================================================================
// Notes
// ============================================================================

/// Free-form author notes on a character (may be empty, <=10000 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Notes(String);

impl Notes {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        bounded_text("Notes", text.into(), MAX_BIOGRAPHY_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for Notes {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Notes> for String {
    fn from(notes: Notes) -> String {
        notes.0
    }
}

// ============================================================================
// Description
// ============================================================================

/// A validated narrative description (may be empty, <=5000 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Create a new validated description.
    ///
    /// Empty strings are valid for descriptions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the description exceeds 5000 characters.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        bounded_text("Description", text.into(), MAX_DESCRIPTION_LENGTH).map(Self)
    }

    /// Create an empty description.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Returns the description as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the description is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Description> for String {
    fn from(desc: Description) -> String {
        desc.0
    }
}

// ============================================================================
// RelationshipNote
// ============================================================================

/// Free text describing a relationship (may be empty, <=1000 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelationshipNote(String);

impl RelationshipNote {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        bounded_text(
            "Relationship description",
            text.into(),
            MAX_RELATIONSHIP_DESCRIPTION_LENGTH,
        )
        .map(Self)
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RelationshipNote {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RelationshipNote> for String {
    fn from(note: RelationshipNote) -> String {
        note.0
    }
}

// ============================================================================
// EventTitle
// ============================================================================

/// A validated narrative event title (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventTitle(String);

impl EventTitle {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the title is empty after trimming
    /// or exceeds 200 characters.
    pub fn new(title: impl Into<String>) -> Result<Self, DomainError> {
        required_label("Event title", &title.into(), MAX_TITLE_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EventTitle {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<EventTitle> for String {
    fn from(title: EventTitle) -> String {
        title.0
    }
}

// ============================================================================
// Tag
// ============================================================================

/// A validated tag for organizing characters and events
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Create a new validated tag.
    ///
    /// The tag is trimmed. Case is preserved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The tag is empty after trimming
    /// - The tag exceeds 100 characters after trimming
    pub fn new(tag: impl Into<String>) -> Result<Self, DomainError> {
        required_label("Tag", &tag.into(), MAX_LABEL_LENGTH).map(Self)
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Tag {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> String {
        tag.0
    }
}

// ============================================================================
// Affiliation
// ============================================================================

/// A faction, guild, or organization the character belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Affiliation(String);

impl Affiliation {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        required_label("Affiliation", &name.into(), MAX_LABEL_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Affiliation {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Affiliation> for String {
    fn from(affiliation: Affiliation) -> String {
        affiliation.0
    }
}
