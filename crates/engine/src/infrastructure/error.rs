//! Error types for the persistence layer.

use std::path::{Path, PathBuf};

use charsheet_domain::DomainError;
use thiserror::Error;

/// Failure while saving, loading, or validating a character file.
///
/// Each variant is a distinct condition a caller can react to: a missing
/// file, a directory where a file was expected, unreadable content, content
/// that reads fine but breaks a domain rule, and plain I/O failure.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Nothing exists at the path.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Something exists at the path but it is not a regular file.
    #[error("Not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    /// Content is not JSON, or not shaped like a character record.
    #[error("Malformed character data: {0}")]
    Malformed(String),

    /// Content parsed but breaks a domain rule.
    #[error("Invalid character data: {0}")]
    Validation(String),

    /// Filesystem operation failed.
    #[error("I/O error during {operation} on {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be turned into JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PersistError {
    /// Create an Io error with operation and path context.
    pub fn io(operation: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a Malformed error.
    pub fn malformed(message: impl ToString) -> Self {
        Self::Malformed(message.to_string())
    }

    /// Create a Validation error.
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when the problem lies in the chosen file rather than the system:
    /// the caller can pick another file and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotAFile { .. } | Self::Malformed(_) | Self::Validation(_)
        )
    }
}

impl From<DomainError> for PersistError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.message().to_string())
    }
}

/// Failure while reading or decoding a portrait image.
#[derive(Debug, Error)]
pub enum PortraitError {
    #[error("Image not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Unsupported image format: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("Image is {size} bytes, limit is {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("Invalid image data: {0}")]
    Decode(String),

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_become_validation_with_bare_message() {
        let err: PersistError = DomainError::validation("Level must be between 1 and 100, got 0").into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid character data: Level must be between 1 and 100, got 0"
        );
    }

    #[test]
    fn recoverable_classification() {
        assert!(PersistError::NotFound { path: "x".into() }.is_recoverable());
        assert!(PersistError::malformed("bad json").is_recoverable());
        let io = PersistError::io(
            "write",
            "/tmp/x.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!io.is_recoverable());
        assert!(io.to_string().contains("write"));
        assert!(io.to_string().contains("/tmp/x.json"));
    }
}
