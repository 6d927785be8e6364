//! Snapshot persistence.
//!
//! A snapshot is the complete index state serialized as JSON and compressed
//! with gzip. Every map in it is ordered, so decoding a snapshot and encoding
//! it again yields the same bytes.
//!
//! # Core Components
//!
//! - [`IndexSnapshot`] - the serializable index state
//! - [`codec::SnapshotCodec`] - JSON + gzip encoding
//! - [`store::SnapshotStore`] - a blob store with staleness tracking

pub mod codec;
pub mod store;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::index::posting::FieldPostings;
use crate::index::stored::StoredDocument;
use crate::index::DocNumber;

pub use codec::SnapshotCodec;
pub use store::SnapshotStore;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Default snapshot file name inside a file-backed index directory.
pub const DEFAULT_SNAPSHOT_FILE: &str = "index.gz";

/// The serializable state of an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub version: u32,
    pub last_modified: DateTime<Utc>,
    pub next_doc_number: DocNumber,
    pub verbatim_fields: BTreeSet<String>,
    pub documents: BTreeMap<DocNumber, StoredDocument>,
    pub postings: BTreeMap<String, FieldPostings>,
}

impl IndexSnapshot {
    /// Number of documents in the snapshot.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}
