//! Character sheet engine library.
//!
//! Everything that touches the outside world on behalf of the domain crate:
//! JSON files, backups, the recent-files list, portraits, and the clock.
//!
//! ## Structure
//!
//! - `infrastructure/persistence` - `CharacterFileStore` and its helpers
//! - `infrastructure/portrait` - portrait image loading
//! - `infrastructure/settings` - `StorageSettings` from defaults and environment
//! - `infrastructure/ports` - `ClockPort`

pub mod infrastructure;

pub use infrastructure::clock::SystemClock;
pub use infrastructure::error::{PersistError, PortraitError};
pub use infrastructure::persistence::{BackupEntry, CharacterFileStore, SaveOutcome};
pub use infrastructure::portrait::{FsPortraitLoader, PortraitLoader};
pub use infrastructure::ports::ClockPort;
pub use infrastructure::settings::StorageSettings;
