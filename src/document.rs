//! Document module.
//!
//! Documents are flat records: a mandatory string `id` plus any number of
//! named fields. Field names starting with `_` are reserved for internal
//! metadata and are rejected at indexing time.
//!
//! # Core Components
//!
//! - [`document::Document`] - The document structure with its field map
//! - [`field_value::FieldValue`] - Text, integer, float or string-list values
//!
//! # Examples
//!
//! ```
//! use microsearch::document::document::Document;
//!
//! let doc = Document::builder("c3a4b5c6")
//!     .add_text("title", "Design Patterns")
//!     .add_text("published", "1994-10-31")
//!     .add_integer("publishedYear", 1994)
//!     .add_list("tags", vec!["patterns", "oop"])
//!     .build();
//!
//! assert_eq!(doc.id(), "c3a4b5c6");
//! assert_eq!(doc.len(), 4);
//! assert!(doc.has_field("title"));
//! ```

pub mod document;
pub mod field_value;

pub use document::{Document, DocumentBuilder};
pub use field_value::FieldValue;
