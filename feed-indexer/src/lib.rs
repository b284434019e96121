//! # Feed Indexer
//!
//! Entry point library for the activity feed reindex job.
//!
//! This crate reads settings from the environment, wires the MongoDB source
//! and the OpenSearch client into the pipeline, and runs it once.

pub mod config;
pub mod logging;

pub use config::{Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur during reindexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] feed_indexer_pipeline::PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] feed_indexer_repository::SearchError),

    /// Source store error.
    #[error("Source error: {0}")]
    SourceError(#[from] feed_indexer_repository::SourceError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
