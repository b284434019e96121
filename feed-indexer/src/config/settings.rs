//! Environment settings for a reindex run.

use std::env;

use crate::IndexingError;
use feed_indexer_pipeline::orchestrator::{TotalPolicy, DEFAULT_PAGE_SIZE};
use feed_indexer_repository::config::{
    DEFAULT_DATABASE, DEFAULT_FEED_COLLECTION, DEFAULT_TIMELINE_COLLECTION,
};
use feed_indexer_repository::opensearch::DEFAULT_INDEX_NAME;
use feed_indexer_repository::{IndexConfig, SourceConfig};

/// Default search index host.
const DEFAULT_ES_HOST: &str = "http://localhost:9200";

/// Settings for one reindex run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Destination index host URL.
    pub es_host: String,
    /// Source-store connection string.
    pub mongo_uri: String,
    /// Source database and collections.
    pub source: SourceConfig,
    /// Destination index.
    pub index: IndexConfig,
    /// Entries per page and per bulk request.
    pub page_size: u64,
    /// How many entries the run walks.
    pub total: TotalPolicy,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `ES_HOST`: search index URL (default: http://localhost:9200)
    /// - `MONGO_URI`: MongoDB connection string (required)
    /// - `MONGO_DATABASE`: source database (default: vb)
    /// - `FEED_COLLECTION`: activity feed collection (default: advisor_activity_feed)
    /// - `TIMELINE_COLLECTION`: timeline collection (default: timeline)
    /// - `REINDEX_INDEX`: target index (default: advisor_activity_feed_enriched)
    /// - `REINDEX_PAGE_SIZE`: entries per page (default: 100)
    /// - `REINDEX_TOTAL`: fixed number of entries to walk (default: count the collection)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let mongo_uri = var("MONGO_URI").ok_or_else(|| IndexingError::config("MONGO_URI is not set"))?;

        let page_size = match var("REINDEX_PAGE_SIZE") {
            Some(value) => parse_count("REINDEX_PAGE_SIZE", &value)?,
            None => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(IndexingError::config("REINDEX_PAGE_SIZE must be greater than zero"));
        }

        let total = match var("REINDEX_TOTAL") {
            Some(value) => TotalPolicy::Fixed(parse_count("REINDEX_TOTAL", &value)?),
            None => TotalPolicy::Count,
        };

        Ok(Self {
            es_host: var_or("ES_HOST", DEFAULT_ES_HOST),
            mongo_uri,
            source: SourceConfig {
                database: var_or("MONGO_DATABASE", DEFAULT_DATABASE),
                feed_collection: var_or("FEED_COLLECTION", DEFAULT_FEED_COLLECTION),
                timeline_collection: var_or("TIMELINE_COLLECTION", DEFAULT_TIMELINE_COLLECTION),
            },
            index: IndexConfig::new(var_or("REINDEX_INDEX", DEFAULT_INDEX_NAME)),
            page_size,
            total,
        })
    }
}

fn parse_count(key: &str, value: &str) -> Result<u64, IndexingError> {
    value
        .trim()
        .parse()
        .map_err(|e| IndexingError::config(format!("{} must be a non-negative integer: {}", key, e)))
}
