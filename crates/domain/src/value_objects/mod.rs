//! Value objects - Immutable objects defined by their attributes

mod enneagram_profile;
mod level;
mod names;
mod relationship;
mod stat;
mod stat_block;

pub use enneagram_profile::{
    EnneagramProfile, EnneagramWireFormat, HealthBand, InstinctualStack, DEFAULT_AFFINITY,
    MAX_DEVELOPMENT_LEVEL, MAX_SELF_AWARENESS, MIN_DEVELOPMENT_LEVEL, MIN_SELF_AWARENESS,
};
pub use level::{Level, MAX_LEVEL, MIN_LEVEL};
pub use names::{
    Affiliation, Biography, CharacterName, Description, EventTitle, Notes, RelationshipNote, Tag,
    MAX_BIOGRAPHY_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_LABEL_LENGTH, MAX_NAME_LENGTH,
    MAX_RELATIONSHIP_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH,
};
pub use relationship::{
    check_strength, Relationship, RelationshipWireFormat, DEFAULT_RELATIONSHIP_STRENGTH,
    MAX_RELATIONSHIP_STRENGTH, MIN_RELATIONSHIP_STRENGTH,
};
pub use stat::Ability;
pub use stat_block::{
    check_score, modifier, CharacterStats, StatsWireFormat, DEFAULT_STAT, MAX_STAT, MIN_STAT,
};
