//! Text analysis module for MicroSearch.
//!
//! This module turns raw field values into scored index terms. Analysis is a
//! sequential pipeline of composable stages over a token stream:
//!
//! ```text
//! Raw Text → Tokenizer → Lowercase → Folding → N-grams → Stop Words → Scoring
//! ```
//!
//! Verbatim fields bypass the pipeline and are indexed as one exact token.

pub mod analyzer;
pub mod scoring;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::analyzer::Analyzer;
pub use analyzer::field::FieldAnalyzer;
pub use scoring::ScoredTerm;
pub use token::{Token, TokenStream};
