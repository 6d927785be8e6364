//! Result ordering, paging and materialization.

use std::cmp::Ordering;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::document::document::{Document, RESERVED_FIELD_PREFIX};
use crate::document::field_value::FieldValue;
use crate::error::{MicroSearchError, Result};
use crate::index::{DocNumber, INDEXED_FIELD, InvertedIndex};
use crate::query::evaluator::ScoredDocs;
use crate::query::request::{SortDirection, SortSpec};

/// Paging information of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// Number of pages, `ceil(total / size)`.
    #[serde(rename = "PAGES")]
    pub total_pages: usize,
    /// Index of the first result of this page among all results.
    #[serde(rename = "OFFSET")]
    pub offset: usize,
    #[serde(rename = "SIZE")]
    pub size: usize,
}

impl Paging {
    /// Compute paging for `total` results and the slice of them on the page.
    ///
    /// A page past the end is empty. A page size of zero is a query error.
    pub fn compute(total: usize, number: usize, size: usize) -> Result<(Self, Range<usize>)> {
        if size == 0 {
            return Err(MicroSearchError::query("page size must be greater than 0"));
        }
        let offset = number
            .checked_mul(size)
            .ok_or_else(|| MicroSearchError::query(format!("page number {number} is too large")))?;
        let start = offset.min(total);
        let end = offset.saturating_add(size).min(total);
        let paging = Paging {
            total_pages: total.div_ceil(size),
            offset,
            size,
        };
        Ok((paging, start..end))
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse<T = Document> {
    #[serde(rename = "RESULTS")]
    pub results: Vec<T>,
    #[serde(rename = "PAGING")]
    pub paging: Paging,
    /// Number of matching documents across all pages.
    #[serde(rename = "TOTAL")]
    pub total_hits: usize,
}

impl<T> QueryResponse<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Convert every result, keeping the paging information.
    pub fn try_map<U, F>(self, f: F) -> Result<QueryResponse<U>>
    where
        F: FnMut(T) -> Result<U>,
    {
        Ok(QueryResponse {
            results: self.results.into_iter().map(f).collect::<Result<_>>()?,
            paging: self.paging,
            total_hits: self.total_hits,
        })
    }
}

/// Order matching documents.
///
/// Without a sort, results are ordered by descending score. With a sort,
/// they are ordered by the stored value of the sort field: numbers before
/// strings, lists by their first element, documents lacking the field last
/// in either direction. Ties always fall back to indexing order.
pub fn rank(
    index: &InvertedIndex,
    hits: ScoredDocs,
    sort: Option<&SortSpec>,
) -> Result<Vec<DocNumber>> {
    let Some(sort) = sort else {
        let mut scored: Vec<(DocNumber, f64)> = hits.into_iter().collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        return Ok(scored.into_iter().map(|(doc, _)| doc).collect());
    };

    validate_sort_field(&sort.field)?;

    let mut docs: Vec<DocNumber> = hits.into_iter().map(|(doc, _)| doc).collect();
    if sort.field == INDEXED_FIELD {
        docs.sort_unstable();
        if sort.direction == SortDirection::Descending {
            docs.reverse();
        }
        return Ok(docs);
    }

    let mut keyed: Vec<(DocNumber, Option<SortKey<'_>>)> = docs
        .into_iter()
        .map(|doc| {
            let key = index
                .document(doc)
                .and_then(|stored| stored.get_field(&sort.field))
                .and_then(SortKey::of);
            (doc, key)
        })
        .collect();

    keyed.sort_by(|(a_doc, a_key), (b_doc, b_key)| {
        let by_key = match (a_key, b_key) {
            (Some(a), Some(b)) => match sort.direction {
                SortDirection::Ascending => a.compare(b),
                SortDirection::Descending => b.compare(a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_key.then(a_doc.cmp(b_doc))
    });

    Ok(keyed.into_iter().map(|(doc, _)| doc).collect())
}

fn validate_sort_field(field: &str) -> Result<()> {
    if field.is_empty() {
        return Err(MicroSearchError::query("sort field must not be empty"));
    }
    if field.starts_with(RESERVED_FIELD_PREFIX) && field != INDEXED_FIELD {
        return Err(MicroSearchError::query(format!(
            "cannot sort by internal field '{field}'"
        )));
    }
    Ok(())
}

/// Materialize one page of ranked documents.
pub fn page(
    index: &InvertedIndex,
    ranked: &[DocNumber],
    number: usize,
    size: usize,
) -> Result<QueryResponse> {
    let (paging, range) = Paging::compute(ranked.len(), number, size)?;
    let results = ranked[range]
        .iter()
        .filter_map(|&doc| index.document(doc))
        .map(|stored| stored.to_document())
        .collect();
    Ok(QueryResponse {
        results,
        paging,
        total_hits: ranked.len(),
    })
}

#[derive(Debug, Clone, Copy)]
enum SortKey<'a> {
    Integer(i64),
    Number(f64),
    Text(&'a str),
}

impl<'a> SortKey<'a> {
    fn of(value: &'a FieldValue) -> Option<Self> {
        match value {
            FieldValue::Integer(i) => Some(SortKey::Integer(*i)),
            FieldValue::Float(f) => Some(SortKey::Number(*f)),
            FieldValue::Text(s) => Some(SortKey::Text(s)),
            FieldValue::List(items) => items.first().map(|s| SortKey::Text(s)),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Integer(a), SortKey::Number(b)) => compare_mixed(*a, *b),
            (SortKey::Number(a), SortKey::Integer(b)) => compare_mixed(*b, *a).reverse(),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Text(_), _) => Ordering::Greater,
            (_, SortKey::Text(_)) => Ordering::Less,
        }
    }
}

/// Order an integer against a float. A tie in `f64` is settled in `i64`,
/// where a whole float converts exactly (saturating at the bounds).
fn compare_mixed(integer: i64, float: f64) -> Ordering {
    match (integer as f64).total_cmp(&float) {
        Ordering::Equal if float.fract() == 0.0 => integer.cmp(&(float as i64)),
        ordering => ordering,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::field::FieldAnalyzer;
    use crate::index::PreparedDocument;
    use chrono::Utc;

    fn index(documents: Vec<Document>) -> InvertedIndex {
        let analyzer = FieldAnalyzer::new();
        let prepared = documents
            .into_iter()
            .map(|document| {
                let terms = document
                    .fields()
                    .iter()
                    .map(|(name, value)| {
                        let terms = analyzer.analyze_field(name, value, true).unwrap();
                        (name.clone(), terms)
                    })
                    .collect();
                PreparedDocument { document, terms }
            })
            .collect();
        let mut index = InvertedIndex::new();
        index.insert(prepared, Vec::new(), Utc::now());
        index
    }

    fn all(index: &InvertedIndex) -> ScoredDocs {
        index.doc_numbers().map(|doc| (doc, 1.0)).collect()
    }

    fn ids(index: &InvertedIndex, ranked: &[DocNumber]) -> Vec<String> {
        ranked
            .iter()
            .map(|doc| index.document(*doc).unwrap().id.clone())
            .collect()
    }

    #[test]
    fn test_paging_arithmetic() {
        let (paging, range) = Paging::compute(30, 0, 20).unwrap();
        assert_eq!(paging, Paging { total_pages: 2, offset: 0, size: 20 });
        assert_eq!(range, 0..20);

        let (paging, range) = Paging::compute(30, 1, 20).unwrap();
        assert_eq!(paging.offset, 20);
        assert_eq!(range.len(), 10);

        let (paging, range) = Paging::compute(30, 3, 10).unwrap();
        assert_eq!(paging, Paging { total_pages: 3, offset: 30, size: 10 });
        assert!(range.is_empty());

        let (paging, range) = Paging::compute(0, 0, 10).unwrap();
        assert_eq!(paging.total_pages, 0);
        assert!(range.is_empty());

        assert!(Paging::compute(30, 0, 0).is_err());
        assert!(Paging::compute(30, usize::MAX, 2).is_err());
    }

    #[test]
    fn test_rank_by_score_then_indexing_order() {
        let index = index(vec![
            Document::builder("a").build(),
            Document::builder("b").build(),
            Document::builder("c").build(),
        ]);
        let hits: ScoredDocs = [(0, 0.5), (1, 1.0), (2, 0.5)].into_iter().collect();
        let ranked = rank(&index, hits, None).unwrap();
        assert_eq!(ids(&index, &ranked), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_mixed_values() {
        let index = index(vec![
            Document::builder("text").add_text("v", "apple").build(),
            Document::builder("missing").build(),
            Document::builder("ten").add_integer("v", 10).build(),
            Document::builder("nine").add_float("v", 9.5).build(),
            Document::builder("list").add_list("v", vec!["banana", "aardvark"]).build(),
        ]);

        let ranked = rank(&index, all(&index), Some(&SortSpec::ascending("v"))).unwrap();
        assert_eq!(ids(&index, &ranked), vec!["nine", "ten", "text", "list", "missing"]);

        let ranked = rank(&index, all(&index), Some(&SortSpec::descending("v"))).unwrap();
        assert_eq!(ids(&index, &ranked), vec!["list", "text", "ten", "nine", "missing"]);
    }

    #[test]
    fn test_sort_large_integers_exactly() {
        let big = 1_i64 << 60;
        let index = index(vec![
            Document::builder("plus_one").add_integer("n", big + 1).build(),
            Document::builder("exact").add_integer("n", big).build(),
            Document::builder("float").add_float("n", big as f64 + 4096.0).build(),
            Document::builder("plus_two").add_integer("n", big + 2).build(),
        ]);

        let ranked = rank(&index, all(&index), Some(&SortSpec::ascending("n"))).unwrap();
        assert_eq!(ids(&index, &ranked), vec!["exact", "plus_one", "plus_two", "float"]);

        let ranked = rank(&index, all(&index), Some(&SortSpec::descending("n"))).unwrap();
        assert_eq!(ids(&index, &ranked), vec!["float", "plus_two", "plus_one", "exact"]);
    }

    #[test]
    fn test_sort_ties_keep_indexing_order() {
        let index = index(vec![
            Document::builder("x").add_integer("year", 1999).build(),
            Document::builder("y").add_integer("year", 2001).build(),
            Document::builder("z").add_integer("year", 1999).build(),
        ]);
        let ranked = rank(&index, all(&index), Some(&SortSpec::descending("year"))).unwrap();
        assert_eq!(ids(&index, &ranked), vec!["y", "x", "z"]);

        let ranked = rank(&index, all(&index), Some(&SortSpec::descending(INDEXED_FIELD))).unwrap();
        assert_eq!(ids(&index, &ranked), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_invalid_sort_fields() {
        let index = index(Vec::new());
        assert!(rank(&index, ScoredDocs::new(), Some(&SortSpec::ascending(""))).is_err());
        assert!(rank(&index, ScoredDocs::new(), Some(&SortSpec::ascending("_secret"))).is_err());
    }

    #[test]
    fn test_page_materializes_documents() {
        let index = index(vec![
            Document::builder("a").add_text("title", "A").build(),
            Document::builder("b").add_text("title", "B").build(),
            Document::builder("c").add_text("title", "C").build(),
        ]);
        let ranked = rank(&index, all(&index), None).unwrap();

        let response = page(&index, &ranked, 1, 2).unwrap();
        assert_eq!(response.total_hits, 3);
        assert_eq!(response.paging, Paging { total_pages: 2, offset: 2, size: 2 });
        assert_eq!(response.results, vec![Document::builder("c").add_text("title", "C").build()]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["PAGING"]["PAGES"], 2);
        assert_eq!(json["RESULTS"][0]["id"], "c");
        assert_eq!(json["TOTAL"], 3);
    }
}
