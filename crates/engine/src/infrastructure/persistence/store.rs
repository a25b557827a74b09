//! JSON file store for characters.
//!
//! One character per file. Saving validates before touching the disk, keeps
//! timestamped backups of the previous content, and replaces the file
//! atomically. Every successful save or load moves the file to the front of
//! the recent-files list.
//!
//! At most one writer per path is assumed; two stores saving the same file
//! at once race.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use charsheet_domain::common::format_datetime;
use charsheet_domain::Character;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use super::backup::{self, BackupEntry};
use super::recent_files::{write_atomically, RecentFiles};
use super::validation::{character_from_value, validate_record};
use crate::infrastructure::error::PersistError;
use crate::infrastructure::ports::ClockPort;
use crate::infrastructure::settings::StorageSettings;

/// What a successful save did besides writing the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub path: PathBuf,
    /// Backup of the previous content, if there was any and backups are on.
    pub backup: Option<PathBuf>,
    /// Old backups deleted to stay within the retention limit.
    pub pruned: usize,
}

pub struct CharacterFileStore {
    settings: StorageSettings,
    clock: Arc<dyn ClockPort>,
    recent: RecentFiles,
}

impl CharacterFileStore {
    /// Create a store, reading the recent-files list named in `settings`.
    pub fn new(settings: StorageSettings, clock: Arc<dyn ClockPort>) -> Self {
        let recent = RecentFiles::load(
            settings.recent_files_path.clone(),
            settings.recent_files_limit,
        );
        Self {
            settings,
            clock,
            recent,
        }
    }

    pub fn settings(&self) -> &StorageSettings {
        &self.settings
    }

    /// Check `character` against the rules a saved file must satisfy.
    pub fn validate(&self, character: &Character) -> Result<(), PersistError> {
        validate_record(&to_value(character)?)
    }

    /// Check the record stored at `path` without building a character from
    /// it. The recent-files list is left alone.
    pub fn validate_file(&self, path: &Path) -> Result<(), PersistError> {
        validate_record(&read_json(path)?)
    }

    /// Write `character` to `path`.
    ///
    /// Order of work:
    /// 1. validate (nothing on disk is touched if this fails)
    /// 2. back up the existing file and prune old backups
    /// 3. write through a temporary file and rename over `path`
    /// 4. stamp `updated_at` on the character and record `path` as recent
    ///
    /// A failure to update the recent-files list is logged, not returned.
    pub fn save(
        &mut self,
        character: &mut Character,
        path: &Path,
    ) -> Result<SaveOutcome, PersistError> {
        let now = self.clock.now();

        let mut record = character.to_record();
        record.updated_at = Some(format_datetime(now));
        let value =
            serde_json::to_value(&record).map_err(|e| PersistError::Serialization(e.to_string()))?;
        validate_record(&value)?;
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| PersistError::Serialization(e.to_string()))?;

        let (backup, pruned) = match fs::metadata(path) {
            Ok(metadata) if !metadata.is_file() => {
                return Err(PersistError::NotAFile {
                    path: path.to_path_buf(),
                })
            }
            Ok(_) => self.rotate_backups(path, now)?,
            Err(e) if e.kind() == ErrorKind::NotFound => (None, 0),
            Err(e) => return Err(PersistError::io("stat", path, e)),
        };

        write_atomically(path, &json)?;
        character.touch(now);
        self.remember(path, now);

        info!(
            path = %path.display(),
            character_id = %character.id(),
            backup = backup.is_some(),
            pruned,
            "Saved character"
        );
        Ok(SaveOutcome {
            path: path.to_path_buf(),
            backup,
            pruned,
        })
    }

    /// Read the character stored at `path`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when nothing exists at `path`
    /// - `NotAFile` when `path` is a directory or other non-file
    /// - `Malformed` for invalid JSON or a wrongly shaped record
    /// - `Validation` when a value breaks a domain rule
    pub fn load(&mut self, path: &Path) -> Result<Character, PersistError> {
        let value = read_json(path)?;
        let now = self.clock.now();
        let character = character_from_value(value, now)?;
        self.remember(path, now);

        info!(
            path = %path.display(),
            character_id = %character.id(),
            name = %character.name(),
            "Loaded character"
        );
        Ok(character)
    }

    /// Backups of `path`, newest first.
    pub fn list_backups(&self, path: &Path) -> Result<Vec<BackupEntry>, PersistError> {
        backup::list_backups(path, &self.backup_dir(path))
    }

    /// Replace `target` with the content of `backup`.
    ///
    /// The backup must hold a valid character. The current `target`, if any,
    /// is backed up first; the path of that new backup is returned.
    pub fn restore_backup(
        &mut self,
        backup: &Path,
        target: &Path,
    ) -> Result<Option<PathBuf>, PersistError> {
        // Read before rotating: pruning may delete the backup being restored.
        let value = read_json(backup)?;
        let now = self.clock.now();
        character_from_value(value.clone(), now)?;
        let json = serde_json::to_vec_pretty(&value)
            .map_err(|e| PersistError::Serialization(e.to_string()))?;

        let previous = match fs::metadata(target) {
            Ok(metadata) if metadata.is_file() => self.rotate_backups(target, now)?.0,
            Ok(_) => {
                return Err(PersistError::NotAFile {
                    path: target.to_path_buf(),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(PersistError::io("stat", target, e)),
        };

        write_atomically(target, &json)?;
        self.remember(target, now);

        info!(
            backup = %backup.display(),
            target = %target.display(),
            "Restored character from backup"
        );
        Ok(previous)
    }

    /// Recently saved or loaded files, newest first.
    pub fn recent_files(&self) -> &[PathBuf] {
        self.recent.files()
    }

    /// Drop `path` from the recent list. Returns `false` if it was not listed.
    pub fn forget_recent(&mut self, path: &Path) -> Result<bool, PersistError> {
        if !self.recent.remove(path) {
            return Ok(false);
        }
        self.recent.save(self.clock.now())?;
        Ok(true)
    }

    pub fn clear_recent(&mut self) -> Result<(), PersistError> {
        self.recent.clear();
        self.recent.save(self.clock.now())
    }

    fn backup_dir(&self, path: &Path) -> PathBuf {
        backup::backup_dir_for(path, self.settings.backup_dir.as_deref())
    }

    /// Back up `path` and prune to the retention limit. No-op when backups
    /// are disabled.
    fn rotate_backups(
        &self,
        path: &Path,
        now: DateTime<Utc>,
    ) -> Result<(Option<PathBuf>, usize), PersistError> {
        let retention = self.settings.backup_retention;
        if retention == 0 {
            return Ok((None, 0));
        }
        let dir = self.backup_dir(path);
        let created = backup::create_backup(path, &dir, now)?;
        let pruned = backup::prune_backups(path, &dir, retention)?;
        Ok((Some(created), pruned.len()))
    }

    fn remember(&mut self, path: &Path, now: DateTime<Utc>) {
        self.recent.push(path);
        if let Err(e) = self.recent.save(now) {
            warn!(
                path = %self.recent.path().display(),
                error = %e,
                "Failed to update recent files list"
            );
        }
    }
}

fn to_value(character: &Character) -> Result<Value, PersistError> {
    serde_json::to_value(character).map_err(|e| PersistError::Serialization(e.to_string()))
}

/// Read `path` as JSON, sorting failures into the store's error kinds.
fn read_json(path: &Path) -> Result<Value, PersistError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PersistError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PersistError::io("stat", path, e),
    })?;
    if !metadata.is_file() {
        return Err(PersistError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => PersistError::malformed("file is not valid UTF-8"),
        _ => PersistError::io("read", path, e),
    })?;
    serde_json::from_str(&text).map_err(PersistError::malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SteppingClock};
    use crate::infrastructure::ports::MockClockPort;
    use charsheet_domain::value_objects::{CharacterName, EventTitle};
    use charsheet_domain::{CharacterId, NarrativeEvent, Relationship, RelationshipType};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn settings_in(dir: &TempDir) -> StorageSettings {
        StorageSettings::default().with_recent_files_path(dir.path().join("state").join("recent.json"))
    }

    fn stepping_store(dir: &TempDir) -> CharacterFileStore {
        CharacterFileStore::new(
            settings_in(dir),
            Arc::new(SteppingClock::new(t0(), Duration::seconds(1))),
        )
    }

    fn hero() -> Character {
        Character::new(CharacterName::new("Aria").unwrap(), t0())
    }

    mod saving {
        use super::*;

        #[test]
        fn save_writes_pretty_json_and_stamps_updated_at() {
            let dir = tempfile::tempdir().expect("tempdir");
            let later = t0() + Duration::hours(2);
            let mut store = CharacterFileStore::new(settings_in(&dir), Arc::new(FixedClock(later)));
            let path = dir.path().join("aria.json");

            let mut character = hero();
            let outcome = store.save(&mut character, &path).unwrap();

            assert_eq!(outcome.backup, None);
            assert_eq!(outcome.pruned, 0);
            assert_eq!(character.updated_at(), later);
            assert_eq!(character.created_at(), t0());

            let text = fs::read_to_string(&path).unwrap();
            assert!(text.contains("\n  \"character_id\""));
            let stored: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(stored["name"], "Aria");
            assert_eq!(stored["updated_at"], format_datetime(later));
            assert_eq!(stored["created_at"], format_datetime(t0()));
        }

        #[test]
        fn second_save_backs_up_previous_content() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let path = dir.path().join("aria.json");

            let mut character = hero();
            store.save(&mut character, &path).unwrap();
            let first = fs::read_to_string(&path).unwrap();

            character.set_name(CharacterName::new("Aria the Bold").unwrap(), t0());
            let outcome = store.save(&mut character, &path).unwrap();

            let backup = outcome.backup.expect("backup created");
            assert_eq!(
                backup.file_name().unwrap().to_string_lossy(),
                "aria_20231114_221321.backup.json"
            );
            assert_eq!(fs::read_to_string(backup).unwrap(), first);
        }

        #[test]
        fn retention_keeps_newest_backups() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let path = dir.path().join("aria.json");

            let mut character = hero();
            for _ in 0..7 {
                store.save(&mut character, &path).unwrap();
            }

            let backups = store.list_backups(&path).unwrap();
            assert_eq!(backups.len(), 5);
            // The oldest backup (taken at the second save) was pruned
            let names: Vec<String> = backups.iter().map(BackupEntry::file_name).collect();
            assert!(!names.contains(&"aria_20231114_221321.backup.json".to_string()));
            assert!(names.contains(&"aria_20231114_221326.backup.json".to_string()));
        }

        #[test]
        fn zero_retention_disables_backups() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = CharacterFileStore::new(
                settings_in(&dir).with_backup_retention(0),
                Arc::new(SteppingClock::new(t0(), Duration::seconds(1))),
            );
            let path = dir.path().join("aria.json");
            let mut character = hero();
            store.save(&mut character, &path).unwrap();
            let outcome = store.save(&mut character, &path).unwrap();
            assert_eq!(outcome.backup, None);
            assert!(store.list_backups(&path).unwrap().is_empty());
        }

        #[test]
        fn backups_go_to_configured_directory() {
            let dir = tempfile::tempdir().expect("tempdir");
            let backup_dir = dir.path().join("backups");
            let mut store = CharacterFileStore::new(
                settings_in(&dir).with_backup_dir(&backup_dir),
                Arc::new(SteppingClock::new(t0(), Duration::seconds(1))),
            );
            let path = dir.path().join("aria.json");
            let mut character = hero();
            store.save(&mut character, &path).unwrap();
            let outcome = store.save(&mut character, &path).unwrap();
            assert_eq!(
                outcome.backup.as_deref().and_then(Path::parent),
                Some(backup_dir.as_path())
            );
        }

        #[cfg(unix)]
        #[test]
        fn failed_write_keeps_original_and_new_backup() {
            use std::os::unix::fs::PermissionsExt;

            let dir = tempfile::tempdir().expect("tempdir");
            let backup_dir = dir.path().join("backups");
            let data_dir = dir.path().join("data");
            fs::create_dir(&data_dir).unwrap();
            let mut store = CharacterFileStore::new(
                settings_in(&dir).with_backup_dir(&backup_dir),
                Arc::new(SteppingClock::new(t0(), Duration::seconds(1))),
            );
            let path = data_dir.join("aria.json");

            let mut character = hero();
            store.save(&mut character, &path).unwrap();
            let original = fs::read(&path).unwrap();

            fs::set_permissions(&data_dir, fs::Permissions::from_mode(0o555)).unwrap();
            if tempfile::NamedTempFile::new_in(&data_dir).is_ok() {
                // Directory permissions are not enforced for this user
                fs::set_permissions(&data_dir, fs::Permissions::from_mode(0o755)).unwrap();
                return;
            }

            character.set_name(CharacterName::new("Aria the Bold").unwrap(), t0());
            let result = store.save(&mut character, &path);
            fs::set_permissions(&data_dir, fs::Permissions::from_mode(0o755)).unwrap();

            assert!(matches!(result, Err(PersistError::Io { .. })));
            assert_eq!(fs::read(&path).unwrap(), original);
            let backups = store.list_backups(&path).unwrap();
            assert_eq!(backups.len(), 1);
            assert_eq!(backups[0].path.parent(), Some(backup_dir.as_path()));
            assert_eq!(fs::read(&backups[0].path).unwrap(), original);
        }

        #[test]
        fn saving_over_a_directory_fails_without_touching_it() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let target = dir.path().join("folder.json");
            fs::create_dir(&target).unwrap();

            let err = store.save(&mut hero(), &target).unwrap_err();
            assert!(matches!(err, PersistError::NotAFile { .. }));
            assert!(target.is_dir());
            assert!(store.recent_files().is_empty());
        }

        #[test]
        fn broken_recent_list_does_not_fail_the_save() {
            let dir = tempfile::tempdir().expect("tempdir");
            let blocker = dir.path().join("blocker");
            fs::write(&blocker, "a file, not a directory").unwrap();
            let settings =
                StorageSettings::default().with_recent_files_path(blocker.join("recent.json"));
            let mut store = CharacterFileStore::new(settings, Arc::new(FixedClock(t0())));

            let path = dir.path().join("aria.json");
            store.save(&mut hero(), &path).unwrap();
            assert!(path.is_file());
        }

        #[test]
        fn a_valid_character_validates() {
            let dir = tempfile::tempdir().expect("tempdir");
            let store = stepping_store(&dir);
            store.validate(&hero()).unwrap();
        }
    }

    mod loading {
        use super::*;

        #[test]
        fn round_trip_keeps_relationships_and_events() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let path = dir.path().join("aria.json");

            let mut character = hero();
            character.add_relationship(
                Relationship::new(
                    CharacterId::new(),
                    CharacterName::new("Bram").unwrap(),
                    RelationshipType::Friend,
                ),
                t0(),
            );
            character.add_event(
                NarrativeEvent::new(EventTitle::new("Coronation").unwrap())
                    .with_date("1205")
                    .unwrap(),
                t0(),
            );
            store.save(&mut character, &path).unwrap();

            let loaded = store.load(&path).unwrap();
            assert_eq!(loaded, character);
        }

        #[test]
        fn distinct_errors_for_each_failure() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);

            let missing = dir.path().join("missing.json");
            assert!(store.load(&missing).unwrap_err().is_not_found());

            let folder = dir.path().join("folder");
            fs::create_dir(&folder).unwrap();
            assert!(matches!(
                store.load(&folder),
                Err(PersistError::NotAFile { .. })
            ));

            let garbage = dir.path().join("garbage.json");
            fs::write(&garbage, "{ not json").unwrap();
            assert!(matches!(
                store.load(&garbage),
                Err(PersistError::Malformed(_))
            ));

            let binary = dir.path().join("binary.json");
            fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
            assert!(matches!(
                store.load(&binary),
                Err(PersistError::Malformed(_))
            ));

            let invalid = dir.path().join("invalid.json");
            let mut value = serde_json::to_value(hero()).unwrap();
            value["level"] = serde_json::json!(0);
            fs::write(&invalid, value.to_string()).unwrap();
            let err = store.load(&invalid).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(
                err.to_string(),
                "Invalid character data: Level must be between 1 and 100, got 0"
            );

            assert!(store.recent_files().is_empty());
        }

        #[test]
        fn missing_timestamps_come_from_the_clock() {
            let dir = tempfile::tempdir().expect("tempdir");
            let loaded_at = t0() + Duration::days(3);
            let mut clock = MockClockPort::new();
            clock.expect_now().returning(move || loaded_at);
            let mut store = CharacterFileStore::new(settings_in(&dir), Arc::new(clock));

            let path = dir.path().join("minimal.json");
            let id = CharacterId::new();
            fs::write(
                &path,
                format!(r#"{{"character_id": "{}", "name": "Minimal", "extra": true}}"#, id),
            )
            .unwrap();

            let loaded = store.load(&path).unwrap();
            assert_eq!(loaded.id(), &id);
            assert_eq!(loaded.level().value(), 1);
            assert_eq!(loaded.created_at(), loaded_at);
            assert_eq!(loaded.updated_at(), loaded_at);
        }

        #[test]
        fn hand_written_ids_load_and_save_unchanged() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let path = dir.path().join("hero.json");
            fs::write(
                &path,
                r#"{"character_id": "hero-001", "name": "Aria", "level": 3}"#,
            )
            .unwrap();

            let mut loaded = store.load(&path).unwrap();
            assert_eq!(loaded.id().as_str(), "hero-001");
            assert_eq!(loaded.level().value(), 3);

            store.save(&mut loaded, &path).unwrap();
            let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
            assert_eq!(stored["character_id"], "hero-001");
        }
    }

    mod validating {
        use super::*;

        #[test]
        fn validate_file_reports_without_touching_recent() {
            let dir = tempfile::tempdir().expect("tempdir");
            let store = stepping_store(&dir);

            let good = dir.path().join("good.json");
            fs::write(&good, serde_json::to_string(&hero()).unwrap()).unwrap();
            store.validate_file(&good).unwrap();

            let bad = dir.path().join("bad.json");
            let mut value = serde_json::to_value(hero()).unwrap();
            value["level"] = serde_json::json!(101);
            fs::write(&bad, value.to_string()).unwrap();
            assert!(store.validate_file(&bad).unwrap_err().is_validation());

            assert!(store
                .validate_file(&dir.path().join("missing.json"))
                .unwrap_err()
                .is_not_found());
            assert!(store.recent_files().is_empty());
            assert!(!dir.path().join("state").join("recent.json").exists());
        }
    }

    mod restoring {
        use super::*;

        #[test]
        fn restore_brings_back_old_content_and_keeps_current() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let path = dir.path().join("aria.json");

            let mut character = hero();
            store.save(&mut character, &path).unwrap();
            character.set_name(CharacterName::new("Aria II").unwrap(), t0());
            let outcome = store.save(&mut character, &path).unwrap();
            let old = outcome.backup.expect("backup created");

            let previous = store.restore_backup(&old, &path).unwrap();
            assert_eq!(store.load(&path).unwrap().name().as_str(), "Aria");

            let previous = previous.expect("current content backed up");
            let saved: Value =
                serde_json::from_str(&fs::read_to_string(previous).unwrap()).unwrap();
            assert_eq!(saved["name"], "Aria II");
        }

        #[test]
        fn restore_survives_pruning_of_its_own_source() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = CharacterFileStore::new(
                settings_in(&dir).with_backup_retention(1),
                Arc::new(SteppingClock::new(t0(), Duration::seconds(1))),
            );
            let path = dir.path().join("aria.json");

            let mut character = hero();
            store.save(&mut character, &path).unwrap();
            character.set_name(CharacterName::new("Aria II").unwrap(), t0());
            let old = store.save(&mut character, &path).unwrap().backup.unwrap();

            store.restore_backup(&old, &path).unwrap();
            assert!(!old.exists());
            assert_eq!(store.load(&path).unwrap().name().as_str(), "Aria");
        }

        #[test]
        fn invalid_backup_is_rejected() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let path = dir.path().join("aria.json");
            store.save(&mut hero(), &path).unwrap();
            let before = fs::read_to_string(&path).unwrap();

            let bad = dir.path().join("aria_20200101_000000.backup.json");
            fs::write(&bad, "[]").unwrap();
            assert!(matches!(
                store.restore_backup(&bad, &path),
                Err(PersistError::Malformed(_))
            ));
            assert_eq!(fs::read_to_string(&path).unwrap(), before);
        }
    }

    mod recent {
        use super::*;

        #[test]
        fn save_and_load_update_the_list() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let a = dir.path().join("a.json");
            let b = dir.path().join("b.json");

            store.save(&mut hero(), &a).unwrap();
            store.save(&mut hero(), &b).unwrap();
            store.load(&a).unwrap();

            let expected = vec![fs::canonicalize(&a).unwrap(), fs::canonicalize(&b).unwrap()];
            assert_eq!(store.recent_files(), expected.as_slice());

            // A new store sees the persisted list
            let reopened = stepping_store(&dir);
            assert_eq!(reopened.recent_files(), expected.as_slice());
        }

        #[test]
        fn forget_and_clear() {
            let dir = tempfile::tempdir().expect("tempdir");
            let mut store = stepping_store(&dir);
            let a = dir.path().join("a.json");
            let b = dir.path().join("b.json");
            store.save(&mut hero(), &a).unwrap();
            store.save(&mut hero(), &b).unwrap();

            assert!(store.forget_recent(&a).unwrap());
            assert!(!store.forget_recent(&a).unwrap());
            assert_eq!(store.recent_files().len(), 1);

            store.clear_recent().unwrap();
            assert!(stepping_store(&dir).recent_files().is_empty());
        }
    }
}
