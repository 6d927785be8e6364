//! Snapshot store with staleness tracking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::Mutex;

use crate::error::Result;
use crate::snapshot::IndexSnapshot;
use crate::snapshot::codec::SnapshotCodec;
use crate::storage::traits::BlobStore;

/// Reads and writes snapshots through a [`BlobStore`].
///
/// The store remembers the modification time it last observed, either after
/// reading the blob or after writing it. [`SnapshotStore::is_current`] compares
/// that time with the blob's current one, so repeated loads of an unchanged
/// blob can be skipped.
#[derive(Debug)]
pub struct SnapshotStore {
    blob: Arc<dyn BlobStore>,
    codec: SnapshotCodec,
    observed: Mutex<Option<DateTime<Utc>>>,
}

impl SnapshotStore {
    pub fn new(blob: Arc<dyn BlobStore>, codec: SnapshotCodec) -> Self {
        SnapshotStore {
            blob,
            codec,
            observed: Mutex::new(None),
        }
    }

    /// The underlying blob store.
    pub fn blob(&self) -> &Arc<dyn BlobStore> {
        &self.blob
    }

    pub fn codec(&self) -> &SnapshotCodec {
        &self.codec
    }

    pub fn location(&self) -> String {
        self.blob.location()
    }

    pub fn exists(&self) -> bool {
        self.blob.exists()
    }

    /// Check if the blob is unchanged since it was last read or written.
    ///
    /// An absent blob, or one never observed, is not current.
    pub fn is_current(&self) -> Result<bool> {
        let observed = *self.observed.lock();
        let Some(observed) = observed else {
            return Ok(false);
        };
        Ok(self.blob.last_modified()? == Some(observed))
    }

    /// Read and decode the snapshot.
    pub fn load(&self) -> Result<IndexSnapshot> {
        let bytes = self.blob.read()?;
        let modified = self.blob.last_modified()?;
        let snapshot = self.codec.decode(&bytes)?;
        *self.observed.lock() = modified;
        info!(
            "Loaded snapshot with {} documents ({} bytes) from {}",
            snapshot.document_count(),
            bytes.len(),
            self.blob.location()
        );
        Ok(snapshot)
    }

    /// Encode and write a snapshot.
    pub fn save(&self, snapshot: &IndexSnapshot) -> Result<()> {
        let bytes = self.codec.encode(snapshot)?;
        self.blob.write(&bytes)?;
        *self.observed.lock() = self.blob.last_modified()?;
        info!(
            "Wrote snapshot with {} documents ({} bytes) to {}",
            snapshot.document_count(),
            bytes.len(),
            self.blob.location()
        );
        Ok(())
    }

    /// Remove the persisted snapshot and forget the observed timestamp.
    pub fn destroy(&self) -> Result<()> {
        self.blob.destroy()?;
        *self.observed.lock() = None;
        debug!("Destroyed snapshot at {}", self.blob.location());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::InvertedIndex;
    use crate::storage::memory::MemoryBlobStore;

    fn store() -> (Arc<MemoryBlobStore>, SnapshotStore) {
        let blob = Arc::new(MemoryBlobStore::new());
        let store = SnapshotStore::new(blob.clone(), SnapshotCodec::default());
        (blob, store)
    }

    #[test]
    fn test_is_current_tracks_reads_and_writes() {
        let (blob, store) = store();
        assert!(!store.is_current().unwrap());

        let snapshot = InvertedIndex::new().to_snapshot();
        store.save(&snapshot).unwrap();
        assert!(store.is_current().unwrap());

        // Someone else replaced the blob.
        blob.write(&SnapshotCodec::default().encode(&snapshot).unwrap()).unwrap();
        assert!(!store.is_current().unwrap());

        store.load().unwrap();
        assert!(store.is_current().unwrap());

        store.destroy().unwrap();
        assert!(!store.is_current().unwrap());
        assert!(!store.exists());
    }

    #[test]
    fn test_load_absent_blob() {
        let (_, store) = store();
        assert!(store.load().unwrap_err().is_not_found());
    }

    #[test]
    fn test_failed_decode_keeps_observed_time() {
        let (blob, store) = store();
        store.save(&InvertedIndex::new().to_snapshot()).unwrap();

        blob.write(b"corrupt").unwrap();
        assert!(store.load().is_err());
        assert!(!store.is_current().unwrap());
    }
}
