//! In-memory inverted index.
//!
//! The index maps `field → term → posting list`, where a posting list maps an
//! internal document number to the term's score in that document. Stored
//! documents are kept beside the postings, keyed by the same number.
//!
//! Document numbers are handed out in indexing order and never reused until
//! the index is cleared, so they double as the indexing sequence used for
//! tie-breaking in result ordering.
//!
//! # Core Components
//!
//! - [`posting::PostingList`] / [`posting::FieldPostings`] - ordered posting maps
//! - [`stored::StoredDocument`] - a document's fields plus internal metadata
//! - [`inverted::InvertedIndex`] - the index itself

pub mod inverted;
pub mod posting;
pub mod stored;

pub use inverted::{InvertedIndex, PreparedDocument};
pub use posting::{FieldPostings, PostingList};
pub use stored::StoredDocument;

/// Internal document number, assigned in indexing order.
pub type DocNumber = u64;

/// Internal field present on every document; used as the default query and
/// as the indexing-order sort key.
pub const INDEXED_FIELD: &str = "_indexed";
