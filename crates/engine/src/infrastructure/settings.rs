//! Storage settings.
//!
//! Defaults suit a single desktop user. Every field can be overridden from
//! the environment (a `.env` file is loaded by the binary first):
//!
//! | Variable                        | Field                |
//! |---------------------------------|----------------------|
//! | `CHARSHEET_BACKUP_RETENTION`    | `backup_retention`   |
//! | `CHARSHEET_RECENT_LIMIT`        | `recent_files_limit` |
//! | `CHARSHEET_BACKUP_DIR`          | `backup_dir`         |
//! | `CHARSHEET_RECENT_FILE`         | `recent_files_path`  |
//! | `CHARSHEET_MAX_PORTRAIT_BYTES`  | `max_portrait_bytes` |

use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKUP_RETENTION: usize = 5;
pub const DEFAULT_RECENT_FILES_LIMIT: usize = 10;
pub const DEFAULT_MAX_PORTRAIT_BYTES: u64 = 10 * 1024 * 1024;

const RECENT_FILE_NAME: &str = "recent_files.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Backups kept per character file. `0` disables backups.
    pub backup_retention: usize,
    /// Entries kept in the recent-files list.
    pub recent_files_limit: usize,
    /// Where backups go; `None` means next to the character file.
    pub backup_dir: Option<PathBuf>,
    /// Location of the recent-files list.
    pub recent_files_path: PathBuf,
    /// Largest portrait image accepted, in bytes.
    pub max_portrait_bytes: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backup_retention: DEFAULT_BACKUP_RETENTION,
            recent_files_limit: DEFAULT_RECENT_FILES_LIMIT,
            backup_dir: None,
            recent_files_path: default_recent_files_path(),
            max_portrait_bytes: DEFAULT_MAX_PORTRAIT_BYTES,
        }
    }
}

impl StorageSettings {
    /// Settings with every override read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings with overrides taken from `lookup`; absent or unparseable
    /// values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            backup_retention: parsed(&lookup, "CHARSHEET_BACKUP_RETENTION")
                .unwrap_or(defaults.backup_retention),
            recent_files_limit: parsed(&lookup, "CHARSHEET_RECENT_LIMIT")
                .unwrap_or(defaults.recent_files_limit),
            backup_dir: non_empty("CHARSHEET_BACKUP_DIR")
                .map(PathBuf::from)
                .or(defaults.backup_dir),
            recent_files_path: non_empty("CHARSHEET_RECENT_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.recent_files_path),
            max_portrait_bytes: parsed(&lookup, "CHARSHEET_MAX_PORTRAIT_BYTES")
                .unwrap_or(defaults.max_portrait_bytes),
        }
    }

    pub fn with_backup_retention(mut self, retention: usize) -> Self {
        self.backup_retention = retention;
        self
    }

    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(dir.into());
        self
    }

    pub fn with_recent_files_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.recent_files_path = path.into();
        self
    }

    pub fn with_recent_files_limit(mut self, limit: usize) -> Self {
        self.recent_files_limit = limit;
        self
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}

/// Recent-files list under the platform config directory.
///
/// - Linux: ~/.config/charsheet/recent_files.json
/// - macOS: ~/Library/Application Support/io.charsheet.charsheet/recent_files.json
/// - Windows: C:\Users\<User>\AppData\Roaming\charsheet\charsheet\config\recent_files.json
pub fn default_recent_files_path() -> PathBuf {
    match ProjectDirs::from("io", "charsheet", "charsheet") {
        Some(dirs) => dirs.config_dir().join(RECENT_FILE_NAME),
        // Fallback to current directory if project dirs unavailable
        None => PathBuf::from(RECENT_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let settings = StorageSettings::default();
        assert_eq!(settings.backup_retention, 5);
        assert_eq!(settings.recent_files_limit, 10);
        assert_eq!(settings.backup_dir, None);
        assert!(settings.recent_files_path.ends_with(RECENT_FILE_NAME));
    }

    #[test]
    fn overrides_are_applied() {
        let settings = StorageSettings::from_lookup(lookup_from(&[
            ("CHARSHEET_BACKUP_RETENTION", "3"),
            ("CHARSHEET_RECENT_LIMIT", " 4 "),
            ("CHARSHEET_BACKUP_DIR", "/var/backups/sheets"),
            ("CHARSHEET_RECENT_FILE", "/tmp/recent.json"),
            ("CHARSHEET_MAX_PORTRAIT_BYTES", "1024"),
        ]));
        assert_eq!(settings.backup_retention, 3);
        assert_eq!(settings.recent_files_limit, 4);
        assert_eq!(settings.backup_dir, Some(PathBuf::from("/var/backups/sheets")));
        assert_eq!(settings.recent_files_path, PathBuf::from("/tmp/recent.json"));
        assert_eq!(settings.max_portrait_bytes, 1024);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let settings = StorageSettings::from_lookup(lookup_from(&[
            ("CHARSHEET_BACKUP_RETENTION", "lots"),
            ("CHARSHEET_BACKUP_DIR", "   "),
        ]));
        assert_eq!(settings.backup_retention, DEFAULT_BACKUP_RETENTION);
        assert_eq!(settings.backup_dir, None);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let settings: StorageSettings =
            serde_json::from_str(r#"{"backup_retention": 2}"#).unwrap();
        assert_eq!(settings.backup_retention, 2);
        assert_eq!(settings.recent_files_limit, DEFAULT_RECENT_FILES_LIMIT);
    }
}
