//! Diacritic folding filter.
//!
//! Decomposes each token to Unicode NFD and drops the combining marks, so
//! `"Café"` and `"Cafe"` index to the same term.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that strips diacritics from token text.
#[derive(Clone, Debug, Default)]
pub struct AsciiFoldingFilter;

impl AsciiFoldingFilter {
    /// Create a new folding filter.
    pub fn new() -> Self {
        AsciiFoldingFilter
    }

    /// Fold a single string.
    pub fn fold(text: &str) -> String {
        if text.is_ascii() {
            return text.to_string();
        }
        text.nfd().filter(|c| !is_combining_mark(*c)).collect()
    }
}

impl Filter for AsciiFoldingFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() || token.text.is_ascii() {
                    token
                } else {
                    let folded = Self::fold(&token.text);
                    token.with_text(folded)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}
