//! Character sheet domain model
//!
//! Pure types and rules with no I/O:
//!
//! - [`types`]: the Enneagram graph and other closed vocabularies
//! - [`value_objects`]: stats, profile, relationships, validated text
//! - [`entities`]: narrative events
//! - [`aggregates`]: the `Character` root and its serialized record
//! - [`timeline`]: chronological ordering of free-text event dates
//!
//! Every timestamp-producing operation takes `now` from the caller.

pub mod aggregates;
pub mod common;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod timeline;
pub mod types;
pub mod value_objects;

pub use aggregates::{Character, CharacterRecord, CHARACTER_FORMAT_VERSION};
pub use entities::NarrativeEvent;
pub use error::DomainError;
pub use events::{CharacterUpdate, RelationshipUpsert};
pub use ids::{CharacterId, NarrativeEventId};
pub use timeline::{insertion_index, sort_events, timeline_key, KeyConfidence, TimelineKey};
pub use types::{EnneagramType, Instinct, RelationshipType, Triad};
pub use value_objects::{
    Ability, CharacterStats, EnneagramProfile, InstinctualStack, Level, Relationship,
};
