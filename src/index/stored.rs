//! Stored documents.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::document::Document;
use crate::document::field_value::FieldValue;

/// A document as kept by the index.
///
/// Caller fields and internal metadata live side by side rather than in one
/// map, so a caller field can never shadow the indexing timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// The caller's document id.
    pub id: String,

    /// When the batch containing this document was indexed.
    pub indexed_at: DateTime<Utc>,

    /// The caller's fields.
    pub fields: BTreeMap<String, FieldValue>,
}

impl StoredDocument {
    pub fn new(document: Document, indexed_at: DateTime<Utc>) -> Self {
        let (id, fields) = document.into_parts();
        StoredDocument {
            id,
            indexed_at,
            fields,
        }
    }

    /// Get a stored field value.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Materialize the caller-visible document, without internal metadata.
    pub fn to_document(&self) -> Document {
        let mut document = Document::new(self.id.clone());
        for (name, value) in &self.fields {
            document.add_field(name.clone(), value.clone());
        }
        document
    }
}
