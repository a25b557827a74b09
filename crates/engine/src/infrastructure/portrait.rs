//! Character portrait loading.
//!
//! Portraits are stored inline in the character record as base64 text
//! (`image_data`). The loader is constructed explicitly and handed to
//! whoever needs it.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

use crate::infrastructure::error::PortraitError;

/// File extensions accepted as portraits, lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub trait PortraitLoader: Send + Sync {
    /// Read an image file and return it base64-encoded.
    fn load_encoded(&self, path: &Path) -> Result<String, PortraitError>;

    /// Decode stored `image_data` back into image bytes.
    fn decode(&self, image_data: &str) -> Result<Vec<u8>, PortraitError>;
}

/// Reads portraits from the local filesystem.
pub struct FsPortraitLoader {
    max_bytes: u64,
}

impl FsPortraitLoader {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    fn check_extension(path: &Path) -> Result<(), PortraitError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            Ok(())
        } else {
            Err(PortraitError::UnsupportedFormat { extension })
        }
    }
}

impl PortraitLoader for FsPortraitLoader {
    fn load_encoded(&self, path: &Path) -> Result<String, PortraitError> {
        Self::check_extension(path)?;

        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PortraitError::NotFound {
                path: path.to_path_buf(),
            },
            _ => PortraitError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        if !metadata.is_file() {
            return Err(PortraitError::NotFound {
                path: path.to_path_buf(),
            });
        }
        if metadata.len() > self.max_bytes {
            return Err(PortraitError::TooLarge {
                size: metadata.len(),
                max: self.max_bytes,
            });
        }

        let bytes = fs::read(path).map_err(|e| PortraitError::Io {
            path: PathBuf::from(path),
            source: e,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "Loaded portrait");
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    fn decode(&self, image_data: &str) -> Result<Vec<u8>, PortraitError> {
        general_purpose::STANDARD
            .decode(image_data.trim())
            .map_err(|e| PortraitError::Decode(e.to_string()))
    }
}
