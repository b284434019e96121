//! Dependency initialization and wiring for the reindexer.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::IndexingError;
use feed_indexer_pipeline::{
    loader::SearchLoader,
    orchestrator::{Orchestrator, OrchestratorConfig},
    processor::EnrichmentProcessor,
};
use feed_indexer_repository::{FeedSource, MongoFeedSource, OpenSearchClient, SearchEngineClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Connect to the search index and the source store and build the pipeline.
    ///
    /// Both systems are checked for reachability before the run starts.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new(settings: &Settings) -> Result<Self, IndexingError> {
        info!(
            es_host = %settings.es_host,
            database = %settings.source.database,
            index = %settings.index.name,
            page_size = settings.page_size,
            total = ?settings.total,
            "Initializing dependencies"
        );

        // Both clients connect lazily, so a bad URI fails here without I/O.
        let source = MongoFeedSource::connect(&settings.mongo_uri, settings.source.clone()).await?;
        let search_client = OpenSearchClient::new(&settings.es_host, settings.index.clone()).await?;

        if !search_client.health_check().await? {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }
        info!("OpenSearch connection verified");

        if !source.health_check().await? {
            return Err(IndexingError::config("MongoDB ping was not acknowledged"));
        }
        info!("MongoDB connection verified");

        let loader = SearchLoader::new(Arc::new(search_client));

        let orchestrator = Orchestrator::with_config(
            Arc::new(source),
            EnrichmentProcessor::new(),
            loader,
            OrchestratorConfig {
                page_size: settings.page_size,
                total: settings.total,
            },
        );

        Ok(Self { orchestrator })
    }
}
