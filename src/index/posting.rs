//! Posting lists.
//!
//! Both levels are ordered maps: terms are kept in lexicographic order so a
//! range query is a `BTreeMap::range` scan, and postings are kept in document
//! number order so serialization is deterministic.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::index::DocNumber;

/// The postings of a single term: document number to score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingList {
    postings: BTreeMap<DocNumber, f64>,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the posting for a document.
    pub fn insert(&mut self, doc: DocNumber, score: f64) {
        self.postings.insert(doc, score);
    }

    /// Remove the posting for a document. Returns whether it was present.
    pub fn remove(&mut self, doc: DocNumber) -> bool {
        self.postings.remove(&doc).is_some()
    }

    /// Get the score of a document.
    pub fn get(&self, doc: DocNumber) -> Option<f64> {
        self.postings.get(&doc).copied()
    }

    /// Get the length of the posting list.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the posting list is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Iterate over `(document, score)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (DocNumber, f64)> + '_ {
        self.postings.iter().map(|(&doc, &score)| (doc, score))
    }

    /// Iterate over the document numbers.
    pub fn docs(&self) -> impl Iterator<Item = DocNumber> + '_ {
        self.postings.keys().copied()
    }
}

/// All posting lists of one field, keyed by term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPostings {
    terms: BTreeMap<String, PostingList>,
}

impl FieldPostings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a posting for `term`.
    pub fn add(&mut self, term: &str, doc: DocNumber, score: f64) {
        match self.terms.get_mut(term) {
            Some(list) => list.insert(doc, score),
            None => {
                let mut list = PostingList::new();
                list.insert(doc, score);
                self.terms.insert(term.to_string(), list);
            }
        }
    }

    /// Remove a document's posting for `term`, dropping the list when it
    /// becomes empty.
    pub fn remove(&mut self, term: &str, doc: DocNumber) -> bool {
        let Some(list) = self.terms.get_mut(term) else {
            return false;
        };
        let removed = list.remove(doc);
        if list.is_empty() {
            self.terms.remove(term);
        }
        removed
    }

    /// Get the posting list of a term.
    pub fn get(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Iterate over the terms within the given bounds, in order.
    ///
    /// Bounds that describe an empty interval yield nothing.
    pub fn range<'a>(
        &'a self,
        lower: Bound<&'a str>,
        upper: Bound<&'a str>,
    ) -> impl Iterator<Item = (&'a str, &'a PostingList)> + 'a {
        let (lower, upper, limit) = if is_valid_range(lower, upper) {
            (lower, upper, usize::MAX)
        } else {
            (Bound::Unbounded, Bound::Unbounded, 0)
        };
        self.terms
            .range::<str, _>((lower, upper))
            .take(limit)
            .map(|(term, list)| (term.as_str(), list))
    }

    /// Iterate over all terms in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(term, list)| (term.as_str(), list))
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn is_valid_range(lower: Bound<&str>, upper: Bound<&str>) -> bool {
    match (lower, upper) {
        (Bound::Included(l), Bound::Included(u)) => l <= u,
        (Bound::Included(l), Bound::Excluded(u))
        | (Bound::Excluded(l), Bound::Included(u))
        | (Bound::Excluded(l), Bound::Excluded(u)) => l < u,
        _ => true,
    }
}
