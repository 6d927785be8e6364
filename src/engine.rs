//! The search engine façade.
//!
//! [`MicroSearch`] owns an in-memory [`InvertedIndex`] and a
//! [`SnapshotStore`] it persists to. Mutations are applied in memory and mark
//! the engine dirty; [`MicroSearch::flush`] writes a snapshot only when there
//! is something to write.
//!
//! # Example
//!
//! ```
//! use microsearch::config::IndexConfig;
//! use microsearch::document::Document;
//! use microsearch::engine::MicroSearch;
//! use microsearch::query::{QueryRequest, QueryToken};
//!
//! let engine = MicroSearch::in_memory(IndexConfig::default()).unwrap();
//! engine
//!     .put_many(
//!         vec![
//!             Document::builder("1")
//!                 .add_text("title", "Programming Rust")
//!                 .add_text("published", "2017-12-21")
//!                 .build(),
//!             Document::builder("2")
//!                 .add_text("title", "The Rust Programming Language")
//!                 .add_text("published", "2018-08-12")
//!                 .build(),
//!         ],
//!         &["published"],
//!     )
//!     .unwrap();
//!
//! let response = engine
//!     .query(&QueryRequest::from(QueryToken::field_value("published", "2018-08-12")))
//!     .unwrap();
//! assert_eq!(response.results[0].id(), "2");
//! assert!(engine.is_dirty());
//!
//! engine.flush().unwrap();
//! assert!(!engine.is_dirty());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use rayon::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::analysis::analyzer::field::FieldAnalyzer;
use crate::config::IndexConfig;
use crate::document::document::Document;
use crate::error::Result;
use crate::index::{INDEXED_FIELD, InvertedIndex, PreparedDocument};
use crate::query::evaluator::QueryEvaluator;
use crate::query::request::QueryRequest;
use crate::query::results::{self, QueryResponse};
use crate::query::token::QueryToken;
use crate::snapshot::codec::SnapshotCodec;
use crate::snapshot::store::SnapshotStore;
use crate::storage::file::{FileBlobStore, FileStoreConfig};
use crate::storage::memory::MemoryBlobStore;
use crate::storage::traits::BlobStore;

/// Whether the in-memory index matches the last snapshot written or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Clean,
    Dirty,
}

#[derive(Debug)]
struct EngineState {
    index: InvertedIndex,
    sync: SyncState,
}

/// An embeddable search engine over one index.
///
/// All methods take `&self`; the engine is `Send + Sync` and can be shared
/// behind an `Arc`. Queries run concurrently. A mutation analyzes its batch
/// while queries keep running, then applies it under the write lock, so
/// queries never observe half a batch.
pub struct MicroSearch {
    config: IndexConfig,
    analyzer: FieldAnalyzer,
    snapshots: SnapshotStore,
    state: RwLock<EngineState>,
}

impl std::fmt::Debug for MicroSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("MicroSearch")
            .field("location", &self.snapshots.location())
            .field("documents", &state.index.len())
            .field("sync", &state.sync)
            .finish()
    }
}

impl MicroSearch {
    /// Create an empty engine persisting to `store`.
    ///
    /// Nothing is read from the store until [`MicroSearch::initialize`] or
    /// [`MicroSearch::import`] is called.
    pub fn new(store: Arc<dyn BlobStore>, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = FieldAnalyzer::from_config(&config)?;
        let codec = SnapshotCodec::new(config.compression_level)?;

        Ok(MicroSearch {
            snapshots: SnapshotStore::new(store, codec),
            analyzer,
            config,
            state: RwLock::new(EngineState {
                index: InvertedIndex::new(),
                sync: SyncState::Clean,
            }),
        })
    }

    /// Create an engine persisting to `<root>/<snapshot_file_name>`.
    pub fn open<P: AsRef<Path>>(root: P, config: IndexConfig) -> Result<Self> {
        let store_config =
            FileStoreConfig::new(root).with_file_name(config.snapshot_file_name.clone());
        let store = FileBlobStore::new(store_config)?;
        Self::new(Arc::new(store), config)
    }

    /// Create an engine persisting to a [`MemoryBlobStore`].
    pub fn in_memory(config: IndexConfig) -> Result<Self> {
        Self::new(Arc::new(MemoryBlobStore::new()), config)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Location of the engine's own snapshot.
    pub fn location(&self) -> String {
        self.snapshots.location()
    }

    /// Add or replace a document.
    pub fn put(&self, document: Document) -> Result<()> {
        self.put_many(vec![document], &[])
    }

    /// Add or replace a batch of documents.
    ///
    /// `verbatim_fields` are indexed as single exact terms, in addition to
    /// the fields configured as verbatim and those declared by earlier
    /// batches. The batch is validated as a whole before anything is
    /// indexed; an invalid document aborts the batch and leaves the index
    /// untouched. When an id occurs more than once, the last occurrence wins.
    pub fn put_many(&self, documents: Vec<Document>, verbatim_fields: &[&str]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }
        for document in &documents {
            document.validate()?;
        }

        let state = self.state.upgradable_read();

        let mut verbatim: BTreeSet<String> = state.index.verbatim_fields().clone();
        verbatim.extend(self.config.verbatim_fields.iter().cloned());
        verbatim.extend(verbatim_fields.iter().map(|f| f.to_string()));

        let batch_size = documents.len();
        let prepared = documents
            .into_par_iter()
            .map(|document| self.prepare(document, &verbatim))
            .collect::<Result<Vec<_>>>()?;

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        state.index.insert(prepared, verbatim, Utc::now());
        state.sync = SyncState::Dirty;

        debug!("Indexed {batch_size} documents ({} in index)", state.index.len());
        Ok(())
    }

    /// Add or replace a typed record. The record must serialize to a flat
    /// object with an `id`.
    pub fn put_record<T: Serialize>(&self, record: &T) -> Result<()> {
        self.put_records(std::slice::from_ref(record), &[])
    }

    /// Add or replace a batch of typed records.
    pub fn put_records<T: Serialize>(
        &self,
        records: &[T],
        verbatim_fields: &[&str],
    ) -> Result<()> {
        let documents = records
            .iter()
            .map(|record| Document::from_json_value(serde_json::to_value(record)?))
            .collect::<Result<Vec<_>>>()?;
        self.put_many(documents, verbatim_fields)
    }

    fn prepare(&self, document: Document, verbatim: &BTreeSet<String>) -> Result<PreparedDocument> {
        let mut terms = BTreeMap::new();
        for (field, value) in document.fields() {
            let analyzed = self
                .analyzer
                .analyze_field(field, value, verbatim.contains(field))?;
            terms.insert(field.clone(), analyzed);
        }
        Ok(PreparedDocument { document, terms })
    }

    /// Delete a document by its id.
    pub fn delete(&self, document: &Document) -> Result<()> {
        self.delete_ids(&[document.id()])
    }

    /// Delete documents by their ids.
    pub fn delete_many(&self, documents: &[Document]) -> Result<()> {
        let ids: Vec<&str> = documents.iter().map(Document::id).collect();
        self.delete_ids(&ids)
    }

    /// Delete documents by id. Unknown ids are ignored.
    pub fn delete_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<()> {
        let mut state = self.state.write();
        let removed = state.index.remove(ids);
        if removed > 0 {
            state.sync = SyncState::Dirty;
        }
        debug!("Deleted {removed} of {} requested documents", ids.len());
        Ok(())
    }

    /// Number of indexed documents.
    pub fn count(&self) -> usize {
        self.state.read().index.len()
    }

    /// Remove every document and the persisted snapshot.
    pub fn truncate(&self) -> Result<()> {
        let mut state = self.state.write();
        self.snapshots.destroy()?;
        state.index.clear();
        state.sync = SyncState::Clean;
        info!("Truncated index at {}", self.snapshots.location());
        Ok(())
    }

    /// Run a query.
    ///
    /// Without a query every document matches with the same score, so the
    /// results come in indexing order unless a sort is given.
    pub fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let default_query;
        let token = match &request.query {
            Some(token) => token,
            None => {
                default_query = QueryToken::field(INDEXED_FIELD);
                &default_query
            }
        };
        let (number, size) = match request.page {
            Some(page) => (page.number, page.size.unwrap_or(self.config.default_page_size)),
            None => (0, self.config.default_page_size),
        };

        let state = self.state.read();
        let hits = QueryEvaluator::new(&state.index, &self.analyzer).evaluate(token)?;
        let ranked = results::rank(&state.index, hits, request.sort.as_ref())?;
        results::page(&state.index, &ranked, number, size)
    }

    /// Run a query and deserialize the results into records.
    pub fn query_as<T: DeserializeOwned>(
        &self,
        request: &QueryRequest,
    ) -> Result<QueryResponse<T>> {
        self.query(request)?
            .try_map(|document| Ok(serde_json::from_value(document.to_json_value()?)?))
    }

    /// Whether there are changes not yet written to the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.state.read().sync == SyncState::Dirty
    }

    /// Write a snapshot if the index changed since the last one.
    ///
    /// Queries keep running during the write; mutations wait for it. The
    /// engine stays dirty when the write fails.
    pub fn flush(&self) -> Result<()> {
        let state = self.state.upgradable_read();
        if state.sync == SyncState::Clean {
            debug!("Index is clean, skipping snapshot write");
            return Ok(());
        }
        self.snapshots.save(&state.index.to_snapshot())?;
        RwLockUpgradableReadGuard::upgrade(state).sync = SyncState::Clean;
        Ok(())
    }

    /// Alias of [`MicroSearch::flush`].
    pub fn commit(&self) -> Result<()> {
        self.flush()
    }

    /// Load the persisted snapshot unless it is the one last seen.
    ///
    /// A current snapshot leaves the index and any pending changes alone, so
    /// the next [`MicroSearch::flush`] still writes them. An absent snapshot
    /// leaves the in-memory index and its dirty state as they are; it is not
    /// reset to an empty, clean index. A snapshot that fails to decode leaves
    /// everything untouched as well.
    pub fn initialize(&self) -> Result<()> {
        if self.snapshots.is_current()? {
            debug!("Snapshot at {} is current", self.snapshots.location());
            return Ok(());
        }
        if !self.snapshots.exists() {
            debug!("No snapshot at {}", self.snapshots.location());
            return Ok(());
        }
        let index = InvertedIndex::from_snapshot(self.snapshots.load()?)?;
        self.swap(index, SyncState::Clean);
        Ok(())
    }

    /// Write a snapshot to the engine's own store regardless of the dirty
    /// state, and return its location.
    pub fn export(&self) -> Result<String> {
        let state = self.state.upgradable_read();
        self.snapshots.save(&state.index.to_snapshot())?;
        RwLockUpgradableReadGuard::upgrade(state).sync = SyncState::Clean;
        Ok(self.snapshots.location())
    }

    /// Write a snapshot to another store. The dirty state is not changed.
    pub fn export_to(&self, store: &dyn BlobStore) -> Result<()> {
        let bytes = {
            let state = self.state.read();
            self.snapshots.codec().encode(&state.index.to_snapshot())?
        };
        store.write(&bytes)?;
        info!("Exported snapshot ({} bytes) to {}", bytes.len(), store.location());
        Ok(())
    }

    /// Replace the index with a snapshot.
    ///
    /// With `None` the snapshot is read from the engine's own store and the
    /// engine is clean afterwards. With another store, the engine is dirty
    /// afterwards since its own snapshot no longer matches. An absent
    /// snapshot yields an empty index; a corrupt one is an error and leaves
    /// the live index untouched.
    pub fn import(&self, store: Option<&dyn BlobStore>) -> Result<()> {
        let (snapshot, sync) = match store {
            None => {
                let snapshot = match self.snapshots.load() {
                    Ok(snapshot) => Some(snapshot),
                    Err(e) if e.is_not_found() => None,
                    Err(e) => return Err(e),
                };
                (snapshot, SyncState::Clean)
            }
            Some(store) => {
                let snapshot = match store.read() {
                    Ok(bytes) => Some(self.snapshots.codec().decode(&bytes)?),
                    Err(e) if e.is_not_found() => None,
                    Err(e) => return Err(e),
                };
                (snapshot, SyncState::Dirty)
            }
        };

        let index = match snapshot {
            Some(snapshot) => InvertedIndex::from_snapshot(snapshot)?,
            None => {
                warn!("No snapshot to import, starting from an empty index");
                InvertedIndex::new()
            }
        };
        self.swap(index, sync);
        Ok(())
    }

    fn swap(&self, index: InvertedIndex, sync: SyncState) {
        let mut state = self.state.write();
        info!("Loaded index with {} documents", index.len());
        state.index = index;
        state.sync = sync;
    }
}
