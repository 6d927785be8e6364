//! Core analyzer trait definition.
//!
//! # Examples
//!
//! ```
//! use microsearch::analysis::analyzer::analyzer::Analyzer;
//! use microsearch::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("The Pragmatic Programmer").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "pragmatic");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are shared between the rayon workers that tokenize a batch, so
/// they must be `Send + Sync` and must not keep per-call state.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
