//! Field-level analysis: from a stored field value to scored index terms.
//!
//! [`FieldAnalyzer`] dispatches each value to the right analyzer:
//!
//! - numbers are indexed verbatim in their canonical string form
//! - values of verbatim fields go through the [`KeywordAnalyzer`]
//! - everything else goes through the full-text analyzer and is scored by
//!   term frequency
//!
//! List values are analyzed element by element so n-grams never span two
//! elements; the tokens of all elements are then scored together.
//!
//! # Examples
//!
//! ```
//! use microsearch::analysis::analyzer::field::FieldAnalyzer;
//! use microsearch::document::field_value::FieldValue;
//!
//! let analyzer = FieldAnalyzer::new();
//!
//! let terms = analyzer
//!     .analyze_field("published", &FieldValue::from("1994-10-31"), true)
//!     .unwrap();
//! assert_eq!(terms.len(), 1);
//! assert_eq!(terms[0].term, "1994-10-31");
//!
//! assert_eq!(analyzer.normalize_query("Clean  CODE").unwrap(), "clean code");
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::keyword::KeywordAnalyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::scoring::{ScoredTerm, score_term_frequency};
use crate::analysis::token::Token;
use crate::analysis::token_filter::ngram::{DEFAULT_NGRAM_LENGTHS, NGRAM_SEPARATOR};
use crate::config::IndexConfig;
use crate::document::field_value::FieldValue;
use crate::error::Result;

/// Turns field values into scored terms and query values into lookup terms.
#[derive(Clone)]
pub struct FieldAnalyzer {
    text: Arc<dyn Analyzer>,
    keyword: Arc<KeywordAnalyzer>,
    query: Arc<PipelineAnalyzer>,
    max_ngram: usize,
}

impl FieldAnalyzer {
    /// Field analyzer with the default full-text pipeline.
    pub fn new() -> Self {
        Self::with_analyzer(Arc::new(StandardAnalyzer::new()))
    }

    /// Field analyzer built from the analysis settings of an index config.
    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        let analyzer =
            StandardAnalyzer::with_config(config.ngram_lengths.clone(), config.stop_words.clone())?;
        let max_ngram = config.ngram_lengths.iter().copied().max().unwrap_or(1);
        Ok(Self::with_analyzer(Arc::new(analyzer)).with_max_ngram(max_ngram))
    }

    /// Field analyzer with a custom full-text analyzer.
    pub fn with_analyzer(text: Arc<dyn Analyzer>) -> Self {
        FieldAnalyzer {
            text,
            keyword: Arc::new(KeywordAnalyzer::new()),
            query: Arc::new(StandardAnalyzer::query_normalizer()),
            max_ngram: DEFAULT_NGRAM_LENGTHS.iter().copied().max().unwrap_or(1),
        }
    }

    /// Set the longest n-gram the full-text analyzer produces.
    pub fn with_max_ngram(mut self, max_ngram: usize) -> Self {
        self.max_ngram = max_ngram.max(1);
        self
    }

    /// Get the full-text analyzer.
    pub fn text_analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.text
    }

    /// Analyze one field value into its distinct scored terms, ordered by term.
    pub fn analyze_field(
        &self,
        field: &str,
        value: &FieldValue,
        verbatim: bool,
    ) -> Result<Vec<ScoredTerm>> {
        if let Some(term) = value.to_index_string() {
            return Ok(vec![ScoredTerm::exact(term)]);
        }

        let terms = match (value, verbatim) {
            (FieldValue::Text(text), true) => self.exact_terms(std::iter::once(text.as_str()))?,
            (FieldValue::List(items), true) => self.exact_terms(items.iter().map(String::as_str))?,
            (FieldValue::Text(text), false) => {
                score_term_frequency(self.text.analyze(text)?)
            }
            (FieldValue::List(items), false) => {
                let mut tokens: Vec<Token> = Vec::new();
                for item in items {
                    tokens.extend(self.text.analyze(item)?);
                }
                score_term_frequency(tokens)
            }
            (FieldValue::Integer(_) | FieldValue::Float(_), _) => Vec::new(),
        };

        if terms.is_empty() {
            log::trace!("field '{field}' produced no terms");
        }
        Ok(terms)
    }

    /// Normalize a query value into the term it should match.
    ///
    /// Words are lowercased and folded like indexed text but neither
    /// stop-filtered nor expanded into n-grams, then joined with the n-gram
    /// separator so a multi-word value finds the matching n-gram term.
    pub fn normalize_query(&self, text: &str) -> Result<String> {
        let words: Vec<String> = self.query.analyze(text)?.map(|token| token.text).collect();
        Ok(words.join(NGRAM_SEPARATOR))
    }

    /// Terms a document must contain to match a full-text query value.
    ///
    /// A value that fits in the longest n-gram is a single term. A longer one
    /// is split into overlapping windows of that length; windows the
    /// full-text analyzer would never index (stop words) are left out.
    pub fn query_terms(&self, text: &str) -> Result<Vec<String>> {
        let words: Vec<String> = self.query.analyze(text)?.map(|token| token.text).collect();
        if words.is_empty() {
            return Ok(Vec::new());
        }
        if words.len() <= self.max_ngram {
            return Ok(vec![words.join(NGRAM_SEPARATOR)]);
        }

        let mut terms: Vec<String> = Vec::new();
        for window in words.windows(self.max_ngram) {
            let term = window.join(NGRAM_SEPARATOR);
            if terms.contains(&term) {
                continue;
            }
            if self.text.analyze(&term)?.any(|token| token.text == term) {
                terms.push(term);
            }
        }
        Ok(terms)
    }

    fn exact_terms<'a, I>(&self, values: I) -> Result<Vec<ScoredTerm>>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut terms = BTreeMap::new();
        for value in values {
            for token in self.keyword.analyze(value)? {
                terms.entry(token.text.clone()).or_insert_with(|| ScoredTerm::exact(token.text));
            }
        }
        Ok(terms.into_values().collect())
    }
}

impl Default for FieldAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAnalyzer")
            .field("text", &self.text.name())
            .field("keyword", &self.keyword.name())
            .finish()
    }
}
