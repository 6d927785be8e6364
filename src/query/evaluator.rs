//! Query evaluation.
//!
//! Each node of the query tree evaluates to a set of scored document
//! numbers. Leaves read posting lists; boolean nodes combine the sets of
//! their children.

use ahash::AHashMap;
use log::debug;

use crate::analysis::analyzer::field::FieldAnalyzer;
use crate::error::Result;
use crate::index::{DocNumber, INDEXED_FIELD, InvertedIndex};
use crate::query::range::TypedRange;
use crate::query::token::{FieldSelector, Literal, QueryToken, QueryValue, RangeValue};

/// Matching documents and their accumulated scores.
pub type ScoredDocs = AHashMap<DocNumber, f64>;

/// Score given to documents matched by an existence check.
const EXISTENCE_SCORE: f64 = 1.0;

/// Evaluates query trees against an index.
pub struct QueryEvaluator<'a> {
    index: &'a InvertedIndex,
    analyzer: &'a FieldAnalyzer,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(index: &'a InvertedIndex, analyzer: &'a FieldAnalyzer) -> Self {
        QueryEvaluator { index, analyzer }
    }

    /// Evaluate a query tree.
    pub fn evaluate(&self, token: &QueryToken) -> Result<ScoredDocs> {
        let docs = match token {
            QueryToken::Term(term) => self.term(term)?,
            QueryToken::Field(field) => self.exists(field),
            QueryToken::FieldValue { field, value } => match value {
                QueryValue::Literal(literal) => self.literal(field, literal)?,
                QueryValue::Range(range) => self.range(field, range)?,
            },
            QueryToken::And(clauses) => self.and(clauses)?,
            QueryToken::Or(clauses) => {
                let mut union = ScoredDocs::new();
                for clause in clauses {
                    merge(&mut union, self.evaluate(clause)?);
                }
                union
            }
            QueryToken::Not { include, exclude } => {
                let mut included = self.evaluate(include)?;
                let excluded = self.evaluate(exclude)?;
                included.retain(|doc, _| !excluded.contains_key(doc));
                included
            }
        };
        Ok(docs)
    }

    /// A bare term: looked up in every full-text field.
    fn term(&self, term: &str) -> Result<ScoredDocs> {
        let terms = self.analyzer.query_terms(term)?;
        let mut docs = ScoredDocs::new();
        if terms.is_empty() {
            return Ok(docs);
        }
        for field in self.index.fields().filter(|f| !self.index.is_verbatim(f)) {
            merge(&mut docs, self.lookup_all(field, &terms));
        }
        debug!("term '{term}' matched {} documents", docs.len());
        Ok(docs)
    }

    fn exists(&self, selector: &FieldSelector) -> ScoredDocs {
        let mut docs = ScoredDocs::new();
        for field in selector.iter() {
            if field == INDEXED_FIELD {
                return self
                    .index
                    .doc_numbers()
                    .map(|doc| (doc, EXISTENCE_SCORE))
                    .collect();
            }
            for (doc, stored) in self.index.documents() {
                if stored.get_field(field).is_some() {
                    docs.insert(doc, EXISTENCE_SCORE);
                }
            }
        }
        docs
    }

    fn literal(&self, selector: &FieldSelector, literal: &Literal) -> Result<ScoredDocs> {
        let mut docs = ScoredDocs::new();
        for field in selector.iter() {
            let terms = match literal.to_index_string() {
                Some(number) => vec![number],
                None if self.index.is_verbatim(field) => vec![literal.to_string()],
                None => self.analyzer.query_terms(&literal.to_string())?,
            };
            if !terms.is_empty() {
                merge(&mut docs, self.lookup_all(field, &terms));
            }
        }
        Ok(docs)
    }

    /// Range scan. A document matching several terms keeps its best score.
    fn range(&self, selector: &FieldSelector, range: &RangeValue) -> Result<ScoredDocs> {
        let typed = TypedRange::from_bounds(range)?;
        let mut docs = ScoredDocs::new();
        for field in selector.iter() {
            let Some(postings) = self.index.field_postings(field) else {
                continue;
            };
            for (_, list) in typed.matching_terms(postings) {
                for (doc, score) in list.iter() {
                    docs.entry(doc)
                        .and_modify(|best| *best = best.max(score))
                        .or_insert(score);
                }
            }
        }
        Ok(docs)
    }

    fn and(&self, clauses: &[QueryToken]) -> Result<ScoredDocs> {
        let Some((first, rest)) = clauses.split_first() else {
            return Ok(ScoredDocs::new());
        };
        let mut result = self.evaluate(first)?;
        for clause in rest {
            if result.is_empty() {
                break;
            }
            let next = self.evaluate(clause)?;
            result.retain(|doc, score| match next.get(doc) {
                Some(other) => {
                    *score += other;
                    true
                }
                None => false,
            });
        }
        Ok(result)
    }

    /// Documents whose field holds every one of `terms`, scores summed.
    fn lookup_all(&self, field: &str, terms: &[String]) -> ScoredDocs {
        let Some((first, rest)) = terms.split_first() else {
            return ScoredDocs::new();
        };
        let mut docs = self.lookup(field, first);
        for term in rest {
            if docs.is_empty() {
                break;
            }
            let next = self.lookup(field, term);
            docs.retain(|doc, score| match next.get(doc) {
                Some(other) => {
                    *score += other;
                    true
                }
                None => false,
            });
        }
        docs
    }

    fn lookup(&self, field: &str, term: &str) -> ScoredDocs {
        self.index
            .field_postings(field)
            .and_then(|postings| postings.get(term))
            .map(|list| list.iter().collect())
            .unwrap_or_default()
    }
}

/// Union `other` into `into`, summing the scores of shared documents.
fn merge(into: &mut ScoredDocs, other: ScoredDocs) {
    for (doc, score) in other {
        *into.entry(doc).or_insert(0.0) += score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::error::MicroSearchError;
    use crate::index::PreparedDocument;
    use chrono::Utc;

    fn index_books() -> (InvertedIndex, FieldAnalyzer) {
        let analyzer = FieldAnalyzer::new();
        let books = vec![
            Document::builder("cc")
                .add_text("title", "Clean Code")
                .add_text("author", "Robert C. Martin")
                .add_text("published", "2008-08-01")
                .add_integer("year", 2008)
                .add_list("tags", vec!["clean code", "craftsmanship"])
                .build(),
            Document::builder("cd")
                .add_text("title", "Continuous Delivery")
                .add_text("author", "Jez Humble, David Farley")
                .add_text("published", "2010-07-27")
                .add_integer("year", 2010)
                .add_list("tags", vec!["continuous delivery", "devops"])
                .build(),
            Document::builder("js")
                .add_text("title", "JavaScript: The Good Parts")
                .add_text("author", "Douglas Crockford")
                .add_text("published", "2008-05-15")
                .add_integer("year", 2008)
                .add_list("tags", vec!["javascript"])
                .build(),
        ];

        let prepared = books
            .into_iter()
            .map(|document| {
                let terms = document
                    .fields()
                    .iter()
                    .map(|(name, value)| {
                        let terms = analyzer.analyze_field(name, value, name == "published").unwrap();
                        (name.clone(), terms)
                    })
                    .collect();
                PreparedDocument { document, terms }
            })
            .collect();

        let mut index = InvertedIndex::new();
        index.insert(prepared, vec!["published".to_string()], Utc::now());
        (index, analyzer)
    }

    fn ids(index: &InvertedIndex, docs: &ScoredDocs) -> Vec<String> {
        let mut ids: Vec<String> = docs
            .keys()
            .map(|doc| index.document(*doc).unwrap().id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn eval(json: serde_json::Value) -> Result<Vec<String>> {
        let (index, analyzer) = index_books();
        let token: QueryToken = serde_json::from_value(json).unwrap();
        let docs = QueryEvaluator::new(&index, &analyzer).evaluate(&token)?;
        Ok(ids(&index, &docs))
    }

    #[test]
    fn test_term_across_fields() {
        assert_eq!(eval(serde_json::json!("CLEAN")).unwrap(), vec!["cc"]);
        assert_eq!(eval(serde_json::json!("good parts")).unwrap(), vec!["js"]);
        assert!(eval(serde_json::json!("...")).unwrap().is_empty());
    }

    #[test]
    fn test_values_longer_than_ngrams() {
        assert_eq!(eval(serde_json::json!("JavaScript: The Good Parts")).unwrap(), vec!["js"]);
        assert_eq!(
            eval(serde_json::json!({"FIELD": "title", "VALUE": "the good parts"})).unwrap(),
            vec!["js"]
        );
        assert!(eval(serde_json::json!("javascript parts good")).unwrap().is_empty());
        assert!(eval(serde_json::json!({"FIELD": "author", "VALUE": "the good parts"})).unwrap().is_empty());
    }

    #[test]
    fn test_term_skips_verbatim_fields() {
        assert!(eval(serde_json::json!("2008-08-01")).unwrap().is_empty());
    }

    #[test]
    fn test_field_value() {
        assert_eq!(
            eval(serde_json::json!({"FIELD": "author", "VALUE": "Robert"})).unwrap(),
            vec!["cc"]
        );
        assert_eq!(
            eval(serde_json::json!({"FIELD": "published", "VALUE": "2008-05-15"})).unwrap(),
            vec!["js"]
        );
        assert_eq!(
            eval(serde_json::json!({"FIELD": "year", "VALUE": 2008})).unwrap(),
            vec!["cc", "js"]
        );
        assert_eq!(
            eval(serde_json::json!({"FIELD": ["title", "tags"], "VALUE": "devops"})).unwrap(),
            vec!["cd"]
        );
    }

    #[test]
    fn test_boolean_combinations() {
        assert_eq!(
            eval(serde_json::json!({"AND": [
                {"FIELD": "author", "VALUE": "David"},
                {"FIELD": "tags", "VALUE": "continuous"}
            ]}))
            .unwrap(),
            vec!["cd"]
        );
        assert_eq!(
            eval(serde_json::json!({"OR": [
                {"FIELD": "title", "VALUE": "clean"},
                {"FIELD": "tags", "VALUE": "clean code"}
            ]}))
            .unwrap(),
            vec!["cc"]
        );
        assert_eq!(
            eval(serde_json::json!({"NOT": {
                "INCLUDE": {"FIELD": "year", "VALUE": {"GTE": 2008, "LTE": 2008}},
                "EXCLUDE": "javascript"
            }}))
            .unwrap(),
            vec!["cc"]
        );
        assert!(eval(serde_json::json!({"AND": []})).unwrap().is_empty());
        assert!(eval(serde_json::json!({"OR": []})).unwrap().is_empty());
    }

    #[test]
    fn test_or_sums_scores() {
        let (index, analyzer) = index_books();
        let evaluator = QueryEvaluator::new(&index, &analyzer);
        let single = evaluator.evaluate(&QueryToken::field_value("title", "clean")).unwrap();
        let both = evaluator
            .evaluate(&QueryToken::or(vec![
                QueryToken::field_value("title", "clean"),
                QueryToken::field_value("title", "clean"),
            ]))
            .unwrap();
        let doc = index.doc_number("cc").unwrap();
        assert_eq!(both.len(), 1);
        assert!((both[&doc] - 2.0 * single[&doc]).abs() < 1e-9);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(
            eval(serde_json::json!({"FIELD": "published", "VALUE": {"GTE": "2008-01-01", "LTE": "2008-12-31"}}))
                .unwrap(),
            vec!["cc", "js"]
        );
        assert_eq!(
            eval(serde_json::json!({"FIELD": "year", "VALUE": {"GTE": 2009}})).unwrap(),
            vec!["cd"]
        );
        let err = eval(serde_json::json!({"FIELD": "year", "VALUE": {"GTE": 2009, "LTE": "2010"}}))
            .unwrap_err();
        assert!(matches!(err, MicroSearchError::Query(_)));
    }

    #[test]
    fn test_existence() {
        assert_eq!(
            eval(serde_json::json!({"FIELD": "_indexed"})).unwrap(),
            vec!["cc", "cd", "js"]
        );
        assert_eq!(eval(serde_json::json!({"FIELD": "author"})).unwrap().len(), 3);
        assert!(eval(serde_json::json!({"FIELD": "isbn"})).unwrap().is_empty());
    }
}
