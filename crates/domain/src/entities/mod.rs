//! Entities - identified objects owned by an aggregate

pub mod narrative_event;

pub use narrative_event::{
    check_importance, NarrativeEvent, NarrativeEventWireFormat, DEFAULT_IMPORTANCE,
    MAX_IMPORTANCE, MIN_IMPORTANCE,
};
