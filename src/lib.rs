//! # MicroSearch
//!
//! An embeddable document search engine with an in-memory inverted index and
//! compressed snapshot persistence.
//!
//! ## Features
//!
//! - Flat JSON documents or any `serde` record with an `id`
//! - Word n-gram full-text analysis with Unicode segmentation and folding
//! - Verbatim fields for exact matches and range queries
//! - Boolean, range and existence queries with sorting and paging
//! - gzip-compressed JSON snapshots over a pluggable blob store
//! - Dirty tracking, so a flush without changes writes nothing
//!
//! ## Example
//!
//! ```
//! use microsearch::prelude::*;
//!
//! let engine = MicroSearch::in_memory(IndexConfig::default()).unwrap();
//! engine
//!     .put(Document::builder("1").add_text("title", "Effective TypeScript").build())
//!     .unwrap();
//!
//! let request: QueryRequest = serde_json::from_str(r#"{"QUERY": "typescript"}"#).unwrap();
//! let response = engine.query(&request).unwrap();
//! assert_eq!(response.results.len(), 1);
//! assert_eq!(response.paging.total_pages, 1);
//! ```

pub mod analysis;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod snapshot;
pub mod storage;

pub mod prelude {
    pub use crate::config::IndexConfig;
    pub use crate::document::{Document, FieldValue};
    pub use crate::engine::MicroSearch;
    pub use crate::error::{MicroSearchError, Result};
    pub use crate::query::{
        FieldSelector, Literal, QueryRequest, QueryResponse, QueryToken, SortDirection,
    };
    pub use crate::storage::{BlobStore, FileBlobStore, MemoryBlobStore};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
