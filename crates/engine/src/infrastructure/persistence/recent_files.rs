//! Most-recently-used list of character files.
//!
//! Stored as `{"files": [...], "last_updated": "<RFC 3339>"}`, newest first.
//! The list is a convenience: a missing or corrupt list file never stops the
//! store from working, it just starts empty.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use charsheet_domain::common::format_datetime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::infrastructure::error::PersistError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RecentFilesRecord {
    #[serde(default)]
    files: Vec<PathBuf>,
    #[serde(default)]
    last_updated: Option<String>,
}

/// Bounded, deduplicated, newest-first list of file paths.
#[derive(Debug, Clone)]
pub struct RecentFiles {
    path: PathBuf,
    limit: usize,
    files: Vec<PathBuf>,
}

impl RecentFiles {
    /// An empty list that will be stored at `path`.
    pub fn empty(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
            files: Vec::new(),
        }
    }

    /// Read the list stored at `path`.
    ///
    /// Entries whose file no longer exists are dropped. An unreadable or
    /// corrupt list is logged and treated as empty.
    pub fn load(path: impl Into<PathBuf>, limit: usize) -> Self {
        let mut recent = Self::empty(path, limit);

        let text = match fs::read_to_string(&recent.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return recent,
            Err(e) => {
                warn!(path = %recent.path.display(), error = %e, "Failed to read recent files list");
                return recent;
            }
        };
        let record: RecentFilesRecord = match serde_json::from_str(&text) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %recent.path.display(), error = %e, "Ignoring corrupt recent files list");
                return recent;
            }
        };

        for file in record.files {
            if !file.is_file() {
                debug!(path = %file.display(), "Dropping stale recent file entry");
                continue;
            }
            if !recent.files.contains(&file) {
                recent.files.push(file);
            }
        }
        recent.files.truncate(limit);
        recent
    }

    /// Entries, newest first.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move `file` to the front, dropping the oldest entry past the limit.
    pub fn push(&mut self, file: &Path) {
        let file = normalize(file);
        self.files.retain(|f| f != &file);
        self.files.insert(0, file);
        self.files.truncate(self.limit);
    }

    /// Returns `false` if `file` was not listed.
    pub fn remove(&mut self, file: &Path) -> bool {
        let file = normalize(file);
        let before = self.files.len();
        self.files.retain(|f| f != &file);
        self.files.len() != before
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Write the list, replacing the stored file atomically.
    pub fn save(&self, now: DateTime<Utc>) -> Result<(), PersistError> {
        let record = RecentFilesRecord {
            files: self.files.clone(),
            last_updated: Some(format_datetime(now)),
        };
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| PersistError::Serialization(e.to_string()))?;
        write_atomically(&self.path, &json)?;
        debug!(path = %self.path.display(), count = self.files.len(), "Saved recent files list");
        Ok(())
    }
}

/// Absolute, symlink-free form of `file` when it exists. A missing file is
/// made absolute against the working directory instead.
fn normalize(file: &Path) -> PathBuf {
    fs::canonicalize(file)
        .or_else(|_| std::path::absolute(file))
        .unwrap_or_else(|_| file.to_path_buf())
}

/// Write `bytes` to a temporary file next to `path` and rename it over `path`.
///
/// A failure at any point leaves the previous content of `path` in place.
/// The permissions of an existing `path` carry over to the new file; a new
/// file gets the usual mode for the process umask.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| PersistError::io("create directory", &dir, e))?;

    let mut tmp = temp_file_in(&dir)
        .map_err(|e| PersistError::io("create temporary file", &dir, e))?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| PersistError::io("set permissions", tmp.path(), e))?;
    }
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| PersistError::io("write", tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| PersistError::io("replace", path, e.error))?;
    Ok(())
}

fn temp_file_in(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Requested mode is masked by the umask, like `fs::write`
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}
