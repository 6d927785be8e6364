//! Storage abstraction trait and common types.

use chrono::{DateTime, Utc};

use crate::error::{MicroSearchError, Result};

/// A store holding a single snapshot blob.
///
/// Implementations are byte sinks and sources only; they never interpret the
/// data. All methods take `&self` so a store can be shared behind an `Arc`.
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Check if the blob exists.
    fn exists(&self) -> bool;

    /// Get the modification time of the blob, or `None` if it does not exist.
    fn last_modified(&self) -> Result<Option<DateTime<Utc>>>;

    /// Read the whole blob.
    ///
    /// Fails with a not-found error when the blob does not exist.
    fn read(&self) -> Result<Vec<u8>>;

    /// Replace the blob with the given bytes.
    fn write(&self, bytes: &[u8]) -> Result<()>;

    /// Remove the blob. Removing an absent blob succeeds.
    fn destroy(&self) -> Result<()>;

    /// Human-readable location of the blob (a path or URI).
    fn location(&self) -> String;
}

/// Error types specific to storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Blob not found.
    BlobNotFound(String),

    /// Permission denied.
    PermissionDenied(String),

    /// I/O error.
    IoError(String),

    /// Invalid operation.
    InvalidOperation(String),
}

impl StorageError {
    /// Classify an I/O error raised while accessing `location`.
    pub fn from_io(location: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::BlobNotFound(location.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::PermissionDenied(location.to_string())
            }
            _ => StorageError::IoError(format!("{location}: {err}")),
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::BlobNotFound(name) => write!(f, "Blob not found: {name}"),
            StorageError::PermissionDenied(name) => write!(f, "Permission denied: {name}"),
            StorageError::IoError(msg) => write!(f, "I/O error: {msg}"),
            StorageError::InvalidOperation(msg) => write!(f, "Invalid operation: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for MicroSearchError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::BlobNotFound(name) => MicroSearchError::not_found(name),
            other => MicroSearchError::storage(other.to_string()),
        }
    }
}
