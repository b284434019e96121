//! Search engine client trait definition.
//!
//! This module defines the abstract interface for the destination index,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::BulkResponse;
use feed_indexer_shared::EnrichedDocument;

/// Abstract interface for search engine operations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// Per-item rejections inside a bulk request are reported through
/// [`BulkResponse`], not as `Err`. An `Err` means the request as a whole failed.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Index multiple documents in a single bulk operation.
    ///
    /// Each document is written under its own `id`, replacing any existing
    /// document with that id.
    ///
    /// # Arguments
    ///
    /// * `documents` - The enriched documents to index
    ///
    /// # Returns
    ///
    /// * `Ok(BulkResponse)` - The per-item outcome of the request
    /// * `Err(SearchError)` - If the request could not be sent or was rejected
    async fn bulk_index(&self, documents: &[EnrichedDocument]) -> Result<BulkResponse, SearchError>;

    /// Ensure the target index exists with proper mappings.
    ///
    /// If the index doesn't exist, it is created. An existing index is left untouched.
    async fn ensure_index_exists(&self) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
