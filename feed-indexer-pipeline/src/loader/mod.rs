//! Loader module for the reindex pipeline.
//!
//! Submits one page of enriched documents to the search index as a single
//! bulk request and reports the outcome.

use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::errors::PipelineError;
use feed_indexer_repository::{BulkIndexSummary, SearchEngineClient};
use feed_indexer_shared::EnrichedDocument;

/// Loader that indexes documents into the search engine.
///
/// The loader does not retry. Items the index rejects are logged with their
/// error details and counted in the returned summary; only a failure of the
/// request as a whole is returned as an error.
pub struct SearchLoader {
    client: Arc<dyn SearchEngineClient>,
}

impl SearchLoader {
    /// Create a new search loader with the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }

    /// Index a batch of documents in one bulk request.
    ///
    /// An empty batch returns an empty summary without contacting the index.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn load(&self, documents: Vec<EnrichedDocument>) -> Result<BulkIndexSummary, PipelineError> {
        if documents.is_empty() {
            return Ok(BulkIndexSummary::default());
        }

        let response = self.client.bulk_index(&documents).await?;
        let summary = BulkIndexSummary::from_response(documents.len(), &response);

        if response.errors || !summary.is_success() {
            let items = serde_json::to_string_pretty(&response.raw_items).unwrap_or_default();
            error!(
                total = summary.total,
                failed = summary.failed,
                items = %items,
                "Bulk insert had errors"
            );

            for failure in &summary.failures {
                let reason = failure
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                error!(
                    document_id = %failure.document_id,
                    status = failure.status,
                    error = %reason,
                    "Document rejected by search index"
                );
            }
        } else {
            info!(count = summary.succeeded, "Indexed {} docs", summary.succeeded);
        }

        Ok(summary)
    }

    /// Ensure the search index exists.
    pub async fn ensure_index(&self) -> Result<(), PipelineError> {
        Ok(self.client.ensure_index_exists().await?)
    }
}
