//! Shared vocabulary types
//!
//! Closed enumerations used across value objects and aggregates.

pub mod enneagram;
pub mod relationship_type;

pub use enneagram::{EnneagramType, Instinct, Triad};
pub use relationship_type::RelationshipType;
