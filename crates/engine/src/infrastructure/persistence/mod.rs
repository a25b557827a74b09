//! File persistence for characters.
//!
//! - `store`: the `CharacterFileStore` used by callers
//! - `validation`: checks on serialized records
//! - `backup`: timestamped backup naming, listing, and pruning
//! - `recent_files`: the most-recently-used list

pub mod backup;
pub mod recent_files;
pub mod store;
pub mod validation;

pub use backup::BackupEntry;
pub use recent_files::RecentFiles;
pub use store::{CharacterFileStore, SaveOutcome};
pub use validation::{validate_record, REQUIRED_FIELDS};
