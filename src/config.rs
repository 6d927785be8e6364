//! Index configuration.
//!
//! [`IndexConfig`] holds the analysis and persistence settings of one index.
//! It is serde-serializable so it can live in a config file next to the
//! application's own settings.
//!
//! # Example
//!
//! ```
//! use microsearch::config::IndexConfig;
//!
//! let config = IndexConfig::builder()
//!     .verbatim_field("published")
//!     .default_page_size(10)
//!     .build();
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.ngram_lengths, vec![1, 2]);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::ngram::DEFAULT_NGRAM_LENGTHS;
use crate::error::{MicroSearchError, Result};
use crate::snapshot::DEFAULT_SNAPSHOT_FILE;
use crate::snapshot::codec::DEFAULT_COMPRESSION_LEVEL;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Configuration for a [`MicroSearch`](crate::engine::MicroSearch) index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Word n-gram lengths produced for full-text fields.
    pub ngram_lengths: Vec<usize>,

    /// Stop word list replacing the built-in English list.
    pub stop_words: Option<Vec<String>>,

    /// Fields always indexed verbatim, in addition to those passed per batch.
    pub verbatim_fields: Vec<String>,

    /// Page size used when a query does not set one.
    pub default_page_size: usize,

    /// gzip level for snapshots (0-9).
    pub compression_level: u32,

    /// File name of the snapshot inside a file-backed index directory.
    pub snapshot_file_name: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            ngram_lengths: DEFAULT_NGRAM_LENGTHS.to_vec(),
            stop_words: None,
            verbatim_fields: Vec::new(),
            default_page_size: DEFAULT_PAGE_SIZE,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            snapshot_file_name: DEFAULT_SNAPSHOT_FILE.to_string(),
        }
    }
}

impl IndexConfig {
    /// Create a new builder for IndexConfig.
    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::new()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_lengths.is_empty() || self.ngram_lengths.contains(&0) {
            return Err(MicroSearchError::invalid_config(
                "ngram_lengths must be non-empty and >= 1",
            ));
        }
        if self.default_page_size == 0 {
            return Err(MicroSearchError::invalid_config(
                "default_page_size must be at least 1",
            ));
        }
        if self.compression_level > 9 {
            return Err(MicroSearchError::invalid_config(format!(
                "compression_level {} is out of range 0-9",
                self.compression_level
            )));
        }
        if self.snapshot_file_name.is_empty() || self.snapshot_file_name.contains(['/', '\\']) {
            return Err(MicroSearchError::invalid_config(format!(
                "snapshot_file_name '{}' must be a plain file name",
                self.snapshot_file_name
            )));
        }
        if let Some(field) = self
            .verbatim_fields
            .iter()
            .find(|field| field.is_empty() || field.starts_with('_'))
        {
            return Err(MicroSearchError::invalid_config(format!(
                "'{field}' cannot be a verbatim field"
            )));
        }
        Ok(())
    }
}

/// Builder for IndexConfig.
#[derive(Debug, Default)]
pub struct IndexConfigBuilder {
    config: IndexConfig,
}

impl IndexConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ngram_lengths(mut self, lengths: Vec<usize>) -> Self {
        self.config.ngram_lengths = lengths;
        self
    }

    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.stop_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Add a field that is always indexed verbatim.
    pub fn verbatim_field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.config.verbatim_fields.contains(&name) {
            self.config.verbatim_fields.push(name);
        }
        self
    }

    pub fn default_page_size(mut self, size: usize) -> Self {
        self.config.default_page_size = size;
        self
    }

    pub fn compression_level(mut self, level: u32) -> Self {
        self.config.compression_level = level;
        self
    }

    pub fn snapshot_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.snapshot_file_name = name.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> IndexConfig {
        self.config
    }
}
