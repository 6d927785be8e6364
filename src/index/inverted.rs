//! The inverted index.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use chrono::{DateTime, Utc};

use crate::analysis::scoring::ScoredTerm;
use crate::document::document::Document;
use crate::error::{MicroSearchError, Result};
use crate::index::posting::FieldPostings;
use crate::index::stored::StoredDocument;
use crate::index::DocNumber;
use crate::snapshot::{IndexSnapshot, SNAPSHOT_VERSION};

/// A validated document together with the analyzed terms of each field.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub document: Document,
    pub terms: BTreeMap<String, Vec<ScoredTerm>>,
}

/// Term vector entry: which `(field, term)` postings a document owns.
type TermRef = (String, String);

/// In-memory inverted index with a document store.
///
/// Invariants kept by every mutation:
///
/// - every posting references a stored document
/// - no posting list and no field map is empty
/// - `ids` and `documents` describe the same set of documents
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    documents: BTreeMap<DocNumber, StoredDocument>,
    postings: BTreeMap<String, FieldPostings>,
    ids: AHashMap<String, DocNumber>,
    term_vectors: AHashMap<DocNumber, Vec<TermRef>>,
    verbatim_fields: BTreeSet<String>,
    next_doc_number: DocNumber,
    last_modified: DateTime<Utc>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        InvertedIndex {
            documents: BTreeMap::new(),
            postings: BTreeMap::new(),
            ids: AHashMap::new(),
            term_vectors: AHashMap::new(),
            verbatim_fields: BTreeSet::new(),
            next_doc_number: 0,
            last_modified: Utc::now(),
        }
    }

    /// Insert a batch of analyzed documents.
    ///
    /// A document whose id is already indexed replaces the old one and moves
    /// to the end of the indexing order. All documents of the batch share the
    /// `indexed_at` timestamp.
    pub fn insert<I>(&mut self, batch: Vec<PreparedDocument>, verbatim_fields: I, indexed_at: DateTime<Utc>)
    where
        I: IntoIterator<Item = String>,
    {
        self.verbatim_fields.extend(verbatim_fields);

        for prepared in batch {
            if let Some(old) = self.ids.get(prepared.document.id()).copied() {
                self.remove_doc(old);
            }

            let doc = self.next_doc_number;
            self.next_doc_number += 1;

            let mut term_vector = Vec::new();
            for (field, terms) in prepared.terms {
                if terms.is_empty() {
                    continue;
                }
                let field_postings = self.postings.entry(field.clone()).or_default();
                for scored in terms {
                    field_postings.add(&scored.term, doc, scored.score);
                    term_vector.push((field.clone(), scored.term));
                }
            }

            let stored = StoredDocument::new(prepared.document, indexed_at);
            self.ids.insert(stored.id.clone(), doc);
            self.documents.insert(doc, stored);
            self.term_vectors.insert(doc, term_vector);
        }

        self.last_modified = indexed_at;
    }

    /// Remove documents by id. Unknown ids are ignored.
    ///
    /// Returns the number of documents removed.
    pub fn remove<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let mut removed = 0;
        for id in ids {
            if let Some(doc) = self.ids.get(id.as_ref()).copied() {
                self.remove_doc(doc);
                removed += 1;
            }
        }
        if removed > 0 {
            self.last_modified = Utc::now();
        }
        removed
    }

    fn remove_doc(&mut self, doc: DocNumber) {
        for (field, term) in self.term_vectors.remove(&doc).unwrap_or_default() {
            if let Some(field_postings) = self.postings.get_mut(&field) {
                field_postings.remove(&term, doc);
                if field_postings.is_empty() {
                    self.postings.remove(&field);
                }
            }
        }
        if let Some(stored) = self.documents.remove(&doc) {
            self.ids.remove(&stored.id);
        }
    }

    /// Remove every document, posting and verbatim declaration, and restart
    /// document numbering.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.postings.clear();
        self.ids.clear();
        self.term_vectors.clear();
        self.verbatim_fields.clear();
        self.next_doc_number = 0;
        self.last_modified = Utc::now();
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Get a stored document by number.
    pub fn document(&self, doc: DocNumber) -> Option<&StoredDocument> {
        self.documents.get(&doc)
    }

    /// Look up the number of a document id.
    pub fn doc_number(&self, id: &str) -> Option<DocNumber> {
        self.ids.get(id).copied()
    }

    /// Check if a document id is indexed.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Iterate over all document numbers in indexing order.
    pub fn doc_numbers(&self) -> impl Iterator<Item = DocNumber> + '_ {
        self.documents.keys().copied()
    }

    /// Iterate over all stored documents in indexing order.
    pub fn documents(&self) -> impl Iterator<Item = (DocNumber, &StoredDocument)> {
        self.documents.iter().map(|(&doc, stored)| (doc, stored))
    }

    /// Get the postings of a field.
    pub fn field_postings(&self, field: &str) -> Option<&FieldPostings> {
        self.postings.get(field)
    }

    /// Names of all fields that have postings.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn is_verbatim(&self, field: &str) -> bool {
        self.verbatim_fields.contains(field)
    }

    /// Fields declared verbatim since the index was created or cleared.
    pub fn verbatim_fields(&self) -> &BTreeSet<String> {
        &self.verbatim_fields
    }

    /// Time of the last mutation.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Capture the full index state.
    pub fn to_snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            version: SNAPSHOT_VERSION,
            last_modified: self.last_modified,
            next_doc_number: self.next_doc_number,
            verbatim_fields: self.verbatim_fields.clone(),
            documents: self.documents.clone(),
            postings: self.postings.clone(),
        }
    }

    /// Rebuild an index from a snapshot.
    ///
    /// The id map and term vectors are derived from the snapshot. A snapshot
    /// that violates the index invariants is rejected with a
    /// deserialization error.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(MicroSearchError::deserialization(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }

        let mut ids = AHashMap::with_capacity(snapshot.documents.len());
        for (&doc, stored) in &snapshot.documents {
            if doc >= snapshot.next_doc_number {
                return Err(MicroSearchError::deserialization(format!(
                    "document number {doc} is not below next_doc_number {}",
                    snapshot.next_doc_number
                )));
            }
            if stored.id.is_empty() {
                return Err(MicroSearchError::deserialization(format!(
                    "document {doc} has an empty id"
                )));
            }
            if ids.insert(stored.id.clone(), doc).is_some() {
                return Err(MicroSearchError::deserialization(format!(
                    "duplicate document id '{}'",
                    stored.id
                )));
            }
        }

        let mut term_vectors: AHashMap<DocNumber, Vec<TermRef>> =
            AHashMap::with_capacity(snapshot.documents.len());
        for (field, field_postings) in &snapshot.postings {
            if field_postings.is_empty() {
                return Err(MicroSearchError::deserialization(format!(
                    "field '{field}' has no terms"
                )));
            }
            for (term, list) in field_postings.iter() {
                if list.is_empty() {
                    return Err(MicroSearchError::deserialization(format!(
                        "term '{term}' in field '{field}' has no postings"
                    )));
                }
                for doc in list.docs() {
                    if !snapshot.documents.contains_key(&doc) {
                        return Err(MicroSearchError::deserialization(format!(
                            "term '{term}' in field '{field}' references missing document {doc}"
                        )));
                    }
                    term_vectors
                        .entry(doc)
                        .or_default()
                        .push((field.clone(), term.to_string()));
                }
            }
        }

        Ok(InvertedIndex {
            documents: snapshot.documents,
            postings: snapshot.postings,
            ids,
            term_vectors,
            verbatim_fields: snapshot.verbatim_fields,
            next_doc_number: snapshot.next_doc_number,
            last_modified: snapshot.last_modified,
        })
    }
}
