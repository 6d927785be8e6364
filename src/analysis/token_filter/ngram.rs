//! Word n-gram filter.
//!
//! Expands a stream of words into word n-grams for each configured length.
//! With lengths `[1, 2]` the stream `clean code handbook` becomes
//! `clean`, `code`, `handbook`, `clean code`, `code handbook`.
//!
//! # Examples
//!
//! ```
//! use microsearch::analysis::token_filter::Filter;
//! use microsearch::analysis::token_filter::ngram::NgramFilter;
//! use microsearch::analysis::token::Token;
//!
//! let filter = NgramFilter::new(vec![1, 2]).unwrap();
//! let tokens = vec![Token::new("clean", 0), Token::new("code", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(result, vec!["clean", "code", "clean code"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{MicroSearchError, Result};

/// Separator placed between the words of an n-gram.
pub const NGRAM_SEPARATOR: &str = " ";

/// Default word n-gram lengths.
pub const DEFAULT_NGRAM_LENGTHS: &[usize] = &[1, 2];

/// A filter that produces word n-grams.
///
/// Output is grouped by length in the configured order, and by start position
/// within a length. Stopped tokens are dropped before the n-grams are built.
#[derive(Clone, Debug)]
pub struct NgramFilter {
    lengths: Vec<usize>,
}

impl NgramFilter {
    /// Create a filter for the given n-gram lengths.
    pub fn new(lengths: Vec<usize>) -> Result<Self> {
        if lengths.is_empty() {
            return Err(MicroSearchError::analysis(
                "n-gram lengths must not be empty",
            ));
        }
        if lengths.contains(&0) {
            return Err(MicroSearchError::analysis("n-gram length must be >= 1"));
        }
        Ok(NgramFilter { lengths })
    }

    /// Unigrams only.
    pub fn unigrams() -> Self {
        NgramFilter { lengths: vec![1] }
    }

    /// Get the configured lengths.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }
}

impl Default for NgramFilter {
    fn default() -> Self {
        NgramFilter {
            lengths: DEFAULT_NGRAM_LENGTHS.to_vec(),
        }
    }
}

impl Filter for NgramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words: Vec<Token> = tokens.filter(|token| !token.is_stopped()).collect();
        let mut output = Vec::with_capacity(words.len() * self.lengths.len());

        for &n in &self.lengths {
            if n == 1 {
                output.extend(words.iter().cloned());
                continue;
            }
            for window in words.windows(n) {
                let text = window
                    .iter()
                    .map(|token| token.text.as_str())
                    .collect::<Vec<_>>()
                    .join(NGRAM_SEPARATOR);
                let first = &window[0];
                let last = &window[n - 1];
                output.push(Token::with_offsets(
                    text,
                    first.position,
                    first.start_offset,
                    last.end_offset,
                ));
            }
        }

        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}
