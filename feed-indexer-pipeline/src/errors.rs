//! Error types for the reindex pipeline.

use feed_indexer_repository::{SearchError, SourceError};
use thiserror::Error;

/// Errors that abort a reindex run.
///
/// Per-item rejections reported inside a bulk response are not errors; the
/// loader logs them and the run continues.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the source store.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// Invalid pipeline configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PipelineError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
