//! In-memory blob store for testing and ephemeral indexes.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::error::Result;
use crate::storage::traits::{BlobStore, StorageError};

#[derive(Debug, Default)]
struct MemoryBlob {
    data: Option<Vec<u8>>,
    modified: Option<DateTime<Utc>>,
}

/// An in-memory blob store.
///
/// Modification timestamps strictly increase from one write to the next, even
/// when two writes land within the same clock tick. Reads and writes are
/// counted so callers can assert how often the store was touched.
#[derive(Debug)]
pub struct MemoryBlobStore {
    name: String,
    blob: Mutex<MemoryBlob>,
    writes: AtomicUsize,
    reads: AtomicUsize,
}

impl MemoryBlobStore {
    /// Create a new, empty memory store.
    pub fn new() -> Self {
        Self::with_name("index.gz")
    }

    /// Create a new memory store with a name used as its location.
    pub fn with_name<S: Into<String>>(name: S) -> Self {
        MemoryBlobStore {
            name: name.into(),
            blob: Mutex::new(MemoryBlob::default()),
            writes: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of successful reads so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Size of the stored blob in bytes (0 when absent).
    pub fn size(&self) -> usize {
        self.blob.lock().data.as_ref().map_or(0, Vec::len)
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobStore {
    fn exists(&self) -> bool {
        self.blob.lock().data.is_some()
    }

    fn last_modified(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.blob.lock().modified)
    }

    fn read(&self) -> Result<Vec<u8>> {
        let blob = self.blob.lock();
        match &blob.data {
            Some(data) => {
                self.reads.fetch_add(1, Ordering::SeqCst);
                Ok(data.clone())
            }
            None => Err(StorageError::BlobNotFound(self.location()).into()),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut blob = self.blob.lock();
        let now = Utc::now();
        let modified = match blob.modified {
            Some(previous) if previous >= now => previous + Duration::microseconds(1),
            _ => now,
        };
        blob.data = Some(bytes.to_vec());
        blob.modified = Some(modified);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        let mut blob = self.blob.lock();
        blob.data = None;
        blob.modified = None;
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory://{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryBlobStore::new();

        assert!(!store.exists());
        assert!(store.read().unwrap_err().is_not_found());
        assert_eq!(store.read_count(), 0);

        store.write(b"abc").unwrap();
        assert!(store.exists());
        assert_eq!(store.size(), 3);
        assert_eq!(store.read().unwrap(), b"abc");
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.read_count(), 1);

        store.destroy().unwrap();
        assert!(!store.exists());
        assert!(store.last_modified().unwrap().is_none());
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let store = MemoryBlobStore::new();
        let mut previous = None;

        for i in 0..50u8 {
            store.write(&[i]).unwrap();
            let modified = store.last_modified().unwrap();
            assert!(modified > previous);
            previous = modified;
        }
    }

    #[test]
    fn test_location() {
        assert_eq!(MemoryBlobStore::with_name("books").location(), "memory://books");
    }
}
