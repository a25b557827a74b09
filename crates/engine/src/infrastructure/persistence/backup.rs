//! Timestamped backups of character files.
//!
//! A backup of `hero.json` taken at 2024-03-09 14:05:07 UTC is named
//! `hero_20240309_140507.backup.json`. Backups of one file are told apart
//! from other files' backups by that exact shape, so pruning never touches
//! unrelated files in a shared backup directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use tracing::{debug, info};

use crate::infrastructure::error::PersistError;

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

static STAMP_REGEX: OnceLock<Regex> = OnceLock::new();

fn stamp_regex() -> &'static Regex {
    STAMP_REGEX.get_or_init(|| {
        Regex::new(r"^\d{8}_\d{6}$").expect("STAMP_REGEX pattern is invalid")
    })
}

/// A backup file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl BackupEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// `(stem, suffix)` of a character file, e.g. `("hero", ".json")`.
fn name_parts(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, suffix)
}

/// File name of a backup of `path` taken at `at`.
pub fn backup_file_name(path: &Path, at: DateTime<Utc>) -> String {
    let (stem, suffix) = name_parts(path);
    format!("{}_{}.backup{}", stem, at.format(STAMP_FORMAT), suffix)
}

/// Whether `file_name` is a backup of `path`.
pub fn is_backup_of(path: &Path, file_name: &str) -> bool {
    let (stem, suffix) = name_parts(path);
    file_name
        .strip_prefix(&format!("{}_", stem))
        .and_then(|rest| rest.strip_suffix(&format!(".backup{}", suffix)))
        .is_some_and(|stamp| stamp_regex().is_match(stamp))
}

/// Directory holding backups of `path`: the configured one, or the file's own.
pub fn backup_dir_for(path: &Path, configured: Option<&Path>) -> PathBuf {
    match configured {
        Some(dir) => dir.to_path_buf(),
        None => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

/// Copy `path` into `dir` as a timestamped backup.
///
/// A second backup within the same second overwrites the first.
pub fn create_backup(path: &Path, dir: &Path, at: DateTime<Utc>) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(dir).map_err(|e| PersistError::io("create backup directory", dir, e))?;
    let backup_path = dir.join(backup_file_name(path, at));
    fs::copy(path, &backup_path).map_err(|e| PersistError::io("backup", path, e))?;
    info!(
        source = %path.display(),
        backup_path = %backup_path.display(),
        "Created backup"
    );
    Ok(backup_path)
}

/// Backups of `path` in `dir`, newest first.
///
/// Ordered by modification time, then file name, both descending. A missing
/// directory means no backups.
pub fn list_backups(path: &Path, dir: &Path) -> Result<Vec<BackupEntry>, PersistError> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(PersistError::io("list backups", dir, e)),
    };

    let mut backups = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| PersistError::io("list backups", dir, e))?;
        let file_name = entry.file_name();
        if !is_backup_of(path, &file_name.to_string_lossy()) {
            continue;
        }
        let metadata = entry
            .metadata()
            .map_err(|e| PersistError::io("stat backup", entry.path(), e))?;
        if !metadata.is_file() {
            continue;
        }
        backups.push(BackupEntry {
            path: entry.path(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        });
    }

    backups.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| b.path.cmp(&a.path))
    });
    Ok(backups)
}

/// Delete all but the `retention` newest backups of `path`.
///
/// Returns the deleted paths.
pub fn prune_backups(
    path: &Path,
    dir: &Path,
    retention: usize,
) -> Result<Vec<PathBuf>, PersistError> {
    let backups = list_backups(path, dir)?;
    let mut removed = Vec::new();
    for stale in backups.into_iter().skip(retention) {
        fs::remove_file(&stale.path).map_err(|e| PersistError::io("prune backup", &stale.path, e))?;
        removed.push(stale.path);
    }
    if !removed.is_empty() {
        debug!(
            source = %path.display(),
            removed = removed.len(),
            retention,
            "Pruned old backups"
        );
    }
    Ok(removed)
}
