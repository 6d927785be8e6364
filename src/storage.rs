//! Storage abstraction layer for MicroSearch.
//!
//! The engine persists its whole state as one snapshot blob, so storage is a
//! single-object interface: a [`BlobStore`] knows one location and can tell
//! whether the blob exists, when it was last modified, and read, write or
//! destroy it. Backends can be swapped without touching the engine.
//!
//! # Storage Types
//!
//! ## FileBlobStore
//! - Disk-based persistent storage at `<index-root>/index.gz`
//! - Writes go to a temporary file that is renamed into place
//!
//! ## MemoryBlobStore
//! - In-process storage for tests and ephemeral indexes
//! - Counts reads and writes
//!
//! Remote object stores plug in by implementing [`BlobStore`].
//!
//! # Example
//!
//! ```
//! use microsearch::storage::{BlobStore, MemoryBlobStore};
//!
//! # fn main() -> microsearch::error::Result<()> {
//! let store = MemoryBlobStore::new();
//! assert!(!store.exists());
//!
//! store.write(b"snapshot bytes")?;
//! assert!(store.exists());
//! assert_eq!(store.read()?, b"snapshot bytes");
//! assert_eq!(store.write_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod memory;
pub mod traits;

pub use file::{FileBlobStore, FileStoreConfig};
pub use memory::MemoryBlobStore;
pub use traits::{BlobStore, StorageError};
