//! Term-frequency scoring of analyzed tokens.
//!
//! A term's score within one field value is the number of times it occurs
//! divided by the number of tokens the pipeline produced, rounded to two
//! decimals. Verbatim terms always score [`MAX_SCORE`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;

/// Score given to verbatim and numeric terms.
pub const MAX_SCORE: f64 = 1.0;

/// A distinct term of a field value together with its score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
}

impl ScoredTerm {
    pub fn new<S: Into<String>>(term: S, score: f64) -> Self {
        ScoredTerm {
            term: term.into(),
            score,
        }
    }

    /// A verbatim term with the maximal score.
    pub fn exact<S: Into<String>>(term: S) -> Self {
        Self::new(term, MAX_SCORE)
    }
}

/// Round a score to two decimals.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Score every distinct token text by its relative frequency.
///
/// The result is ordered by term.
pub fn score_term_frequency<I>(tokens: I) -> Vec<ScoredTerm>
where
    I: IntoIterator<Item = Token>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total = 0usize;
    for token in tokens {
        total += 1;
        *counts.entry(token.text).or_insert(0) += 1;
    }

    if total == 0 {
        return Vec::new();
    }

    counts
        .into_iter()
        .map(|(term, count)| ScoredTerm::new(term, round_score(count as f64 / total as f64)))
        .collect()
}
