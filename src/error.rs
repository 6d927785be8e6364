//! Error types for the MicroSearch library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`MicroSearchError`] enum. The variants mirror the failure classes of the
//! engine: missing snapshots, malformed input documents, corrupt snapshots,
//! storage failures and invalid queries.
//!
//! # Examples
//!
//! ```
//! use microsearch::error::{MicroSearchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MicroSearchError::indexing("document is missing an id"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for MicroSearch operations.
///
/// This enum represents all possible errors that can occur in the library.
/// It uses the `thiserror` crate for the `Error` implementation and provides
/// constructor methods for the common variants.
#[derive(Error, Debug)]
pub enum MicroSearchError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The snapshot or blob does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A document could not be indexed (missing id, reserved field, ...).
    #[error("Indexing error: {0}")]
    Indexing(String),

    /// Snapshot bytes could not be decoded into an index.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors (invalid ranges, paging, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MicroSearchError.
pub type Result<T> = std::result::Result<T, MicroSearchError>;

impl MicroSearchError {
    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::NotFound(msg.into())
    }

    /// Create a new indexing error.
    pub fn indexing<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::Indexing(msg.into())
    }

    /// Create a new deserialization error.
    pub fn deserialization<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::Deserialization(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::Storage(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::Query(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        MicroSearchError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Check whether this error means the snapshot is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MicroSearchError::NotFound(_))
    }
}
