//! Token filter implementations for token transformation.
//!
//! Filters transform the token streams produced by tokenizers. They can
//! modify, remove, or add tokens.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`ascii_folding::AsciiFoldingFilter`] - Strips diacritics
//! - [`ngram::NgramFilter`] - Expands words into word n-grams
//! - [`stop::StopFilter`] - Removes stop words
//! - [`remove_empty::RemoveEmptyFilter`] - Removes empty tokens
//!
//! # Examples
//!
//! ```
//! use microsearch::analysis::token_filter::Filter;
//! use microsearch::analysis::token_filter::lowercase::LowercaseFilter;
//! use microsearch::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream. The trait
/// requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod ascii_folding;
pub mod lowercase;
pub mod ngram;
pub mod remove_empty;
pub mod stop;

pub use ascii_folding::AsciiFoldingFilter;
pub use lowercase::LowercaseFilter;
pub use ngram::NgramFilter;
pub use remove_empty::RemoveEmptyFilter;
pub use stop::StopFilter;
