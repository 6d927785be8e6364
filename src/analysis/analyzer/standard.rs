//! Standard analyzer used for full-text fields.
//!
//! # Pipeline
//!
//! 1. UnicodeWordTokenizer (Unicode word boundaries, punctuation dropped)
//! 2. LowercaseFilter
//! 3. AsciiFoldingFilter
//! 4. NgramFilter (default lengths `[1, 2]`)
//! 5. StopFilter (33 common English stop words)
//! 6. RemoveEmptyFilter
//!
//! # Examples
//!
//! ```
//! use microsearch::analysis::analyzer::analyzer::Analyzer;
//! use microsearch::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new();
//! let tokens: Vec<_> = analyzer
//!     .analyze("Clean Code")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(tokens, vec!["clean", "code", "clean code"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::ascii_folding::AsciiFoldingFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::ngram::NgramFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Default pipeline: unigrams and bigrams, English stop words.
    pub fn new() -> Self {
        Self::build(NgramFilter::default(), StopFilter::new())
    }

    /// Pipeline with custom n-gram lengths and stop words.
    pub fn with_config(ngram_lengths: Vec<usize>, stop_words: Option<Vec<String>>) -> Result<Self> {
        let ngrams = NgramFilter::new(ngram_lengths)?;
        let stop = match stop_words {
            Some(words) => StopFilter::from_words(words),
            None => StopFilter::new(),
        };
        Ok(Self::build(ngrams, stop))
    }

    fn build(ngrams: NgramFilter, stop: StopFilter) -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AsciiFoldingFilter::new()))
            .add_filter(Arc::new(ngrams))
            .add_filter(Arc::new(stop))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("standard");

        StandardAnalyzer { inner: analyzer }
    }

    /// Normalizer applied to query values: same tokenizer and character
    /// normalization as indexing, without n-grams and stop words.
    pub fn query_normalizer() -> PipelineAnalyzer {
        PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AsciiFoldingFilter::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("query")
    }

    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Default for StandardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
