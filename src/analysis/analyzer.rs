//! Analyzer implementations that combine tokenizers and filters.
//!
//! - [`pipeline::PipelineAnalyzer`] - a tokenizer followed by a filter chain
//! - [`standard::StandardAnalyzer`] - the full-text indexing pipeline
//! - [`keyword::KeywordAnalyzer`] - one token per value, for verbatim fields
//! - [`field::FieldAnalyzer`] - picks one of the above per field value and scores the terms

pub mod analyzer;
pub mod field;
pub mod keyword;
pub mod pipeline;
pub mod standard;
