//! Orchestrator module for the reindex pipeline.
//!
//! Walks the activity feed in fixed-size pages and drives the processor and
//! loader for each page, strictly one page at a time.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::PipelineError;
use crate::loader::SearchLoader;
use crate::processor::EnrichmentProcessor;
use feed_indexer_repository::FeedSource;
use feed_indexer_shared::EnrichedDocument;

/// Default number of entries per page and per bulk request.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// How the number of entries to walk is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalPolicy {
    /// Count the feed collection at the start of the run.
    Count,
    /// Walk a fixed number of entries regardless of the collection size.
    Fixed(u64),
}

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Entries fetched per page; also the bulk request size.
    pub page_size: u64,
    /// How the walk bound is determined.
    pub total: TotalPolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            total: TotalPolicy::Count,
        }
    }
}

/// Counters for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReindexReport {
    /// The walk bound the run used.
    pub total: u64,
    /// Number of page fetches issued.
    pub pages: u64,
    /// Documents submitted in bulk requests.
    pub submitted: usize,
    /// Documents the index rejected.
    pub failed: usize,
}

/// Orchestrator that coordinates the pipeline components.
///
/// For every page `[skip, skip + page_size)` with `skip < total`, the
/// orchestrator looks up each entry's timeline one at a time, enriches the
/// entries and submits them as one bulk request. Rejected items do not stop
/// the run; any other error aborts it.
pub struct Orchestrator {
    source: Arc<dyn FeedSource>,
    processor: EnrichmentProcessor,
    loader: SearchLoader,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components and configuration.
    pub fn with_config(
        source: Arc<dyn FeedSource>,
        processor: EnrichmentProcessor,
        loader: SearchLoader,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            source,
            processor,
            loader,
            config,
        }
    }

    /// Run the reindex to completion.
    #[instrument(skip(self), fields(page_size = self.config.page_size))]
    pub async fn run(&self) -> Result<ReindexReport, PipelineError> {
        let page_size = self.config.page_size;
        if page_size == 0 {
            return Err(PipelineError::config("page size must be greater than zero"));
        }

        info!("Starting activity feed reindex");

        self.loader.ensure_index().await?;

        let total = self.resolve_total().await?;
        info!(total = total, "Found {} documents to reindex", total);

        let mut report = ReindexReport {
            total,
            ..ReindexReport::default()
        };

        let mut skip = 0;
        while skip < total {
            let documents = self.process_page(skip, page_size).await?;
            report.pages += 1;

            let summary = self.loader.load(documents).await?;
            report.submitted += summary.total;
            report.failed += summary.failed;

            skip = skip.saturating_add(page_size);
        }

        info!(
            pages = report.pages,
            submitted = report.submitted,
            failed = report.failed,
            "Reindex complete"
        );

        Ok(report)
    }

    async fn resolve_total(&self) -> Result<u64, PipelineError> {
        match self.config.total {
            TotalPolicy::Fixed(total) => Ok(total),
            TotalPolicy::Count => Ok(self.source.count_entries().await?),
        }
    }

    /// Fetch one page and enrich every entry with its timeline.
    async fn process_page(&self, skip: u64, limit: u64) -> Result<Vec<EnrichedDocument>, PipelineError> {
        let entries = self.source.fetch_page(skip, limit).await?;
        info!(skip = skip, count = entries.len(), "Fetched feed page");

        let mut enriched = Vec::with_capacity(entries.len());
        for entry in entries {
            let timeline = match &entry.timeline_ref {
                Some(timeline_ref) => self.source.find_timeline(timeline_ref).await?,
                None => None,
            };
            enriched.push((entry, timeline));
        }

        Ok(self.processor.process_batch(enriched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use feed_indexer_repository::{
        BulkItemResult, BulkResponse, SearchEngineClient, SearchError, SourceError,
    };
    use feed_indexer_shared::{ActivityFeedEntry, RecordId, Timeline};
    use serde_json::{json, Value};
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory feed source ordered by insertion.
    struct MemorySource {
        entries: Vec<ActivityFeedEntry>,
        timelines: HashMap<RecordId, Timeline>,
        fetches: Mutex<Vec<(u64, u64)>>,
        lookups: AtomicUsize,
        fail_at_skip: Option<u64>,
    }

    impl MemorySource {
        fn new(entries: Vec<ActivityFeedEntry>) -> Self {
            Self {
                entries,
                timelines: HashMap::new(),
                fetches: Mutex::new(Vec::new()),
                lookups: AtomicUsize::new(0),
                fail_at_skip: None,
            }
        }

        fn with_entries(count: i64) -> Self {
            Self::new((0..count).map(|i| ActivityFeedEntry::new(RecordId::Int(i))).collect())
        }

        fn fetches(&self) -> Vec<(u64, u64)> {
            self.fetches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FeedSource for MemorySource {
        async fn count_entries(&self) -> Result<u64, SourceError> {
            Ok(self.entries.len() as u64)
        }

        async fn fetch_page(&self, skip: u64, limit: u64) -> Result<Vec<ActivityFeedEntry>, SourceError> {
            self.fetches.lock().unwrap().push((skip, limit));
            if self.fail_at_skip == Some(skip) {
                return Err(SourceError::query("cursor killed"));
            }

            Ok(self
                .entries
                .iter()
                .skip(skip as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn find_timeline(&self, id: &RecordId) -> Result<Option<Timeline>, SourceError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.timelines.get(id).cloned())
        }

        async fn health_check(&self) -> Result<bool, SourceError> {
            Ok(true)
        }
    }

    /// Mock index keeping the last body written under each id.
    struct MemoryIndex {
        documents: Mutex<BTreeMap<String, Value>>,
        batch_sizes: Mutex<Vec<usize>>,
        reject: Vec<String>,
        ensure_calls: AtomicUsize,
    }

    impl MemoryIndex {
        fn new() -> Self {
            Self {
                documents: Mutex::new(BTreeMap::new()),
                batch_sizes: Mutex::new(Vec::new()),
                reject: Vec::new(),
                ensure_calls: AtomicUsize::new(0),
            }
        }

        fn batch_sizes(&self) -> Vec<usize> {
            self.batch_sizes.lock().unwrap().clone()
        }

        fn snapshot(&self) -> BTreeMap<String, Value> {
            self.documents.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchEngineClient for MemoryIndex {
        async fn bulk_index(&self, documents: &[EnrichedDocument]) -> Result<BulkResponse, SearchError> {
            self.batch_sizes.lock().unwrap().push(documents.len());

            let mut stored = self.documents.lock().unwrap();
            let mut items = Vec::with_capacity(documents.len());
            for doc in documents {
                if self.reject.contains(&doc.id) {
                    items.push(BulkItemResult {
                        document_id: doc.id.clone(),
                        status: 400,
                        error: Some(json!({"type": "illegal_argument_exception"})),
                    });
                } else {
                    stored.insert(doc.id.clone(), doc.to_body()?);
                    items.push(BulkItemResult {
                        document_id: doc.id.clone(),
                        status: 201,
                        error: None,
                    });
                }
            }

            Ok(BulkResponse {
                errors: items.iter().any(BulkItemResult::is_failure),
                items,
                raw_items: Value::Array(Vec::new()),
            })
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchError> {
            self.ensure_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn orchestrator(
        source: Arc<MemorySource>,
        index: Arc<MemoryIndex>,
        page_size: u64,
        total: TotalPolicy,
    ) -> Orchestrator {
        Orchestrator::with_config(
            source,
            EnrichmentProcessor::new(),
            SearchLoader::new(index),
            OrchestratorConfig { page_size, total },
        )
    }

    #[tokio::test]
    async fn test_fixed_total_walks_two_pages() {
        let source = Arc::new(MemorySource::with_entries(150));
        let index = Arc::new(MemoryIndex::new());

        let report = orchestrator(source.clone(), index.clone(), 100, TotalPolicy::Fixed(150))
            .run()
            .await
            .unwrap();

        assert_eq!(source.fetches(), vec![(0, 100), (100, 100)]);
        assert_eq!(index.batch_sizes(), vec![100, 50]);
        assert_eq!(
            report,
            ReindexReport {
                total: 150,
                pages: 2,
                submitted: 150,
                failed: 0
            }
        );
        assert_eq!(index.ensure_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_count_policy_uses_collection_size() {
        let source = Arc::new(MemorySource::with_entries(250));
        let index = Arc::new(MemoryIndex::new());

        let report = orchestrator(source.clone(), index.clone(), 100, TotalPolicy::Count)
            .run()
            .await
            .unwrap();

        assert_eq!(report.total, 250);
        assert_eq!(source.fetches().len(), 3);
        assert_eq!(index.batch_sizes(), vec![100, 100, 50]);
        assert_eq!(index.snapshot().len(), 250);
    }

    #[tokio::test]
    async fn test_fixed_total_beyond_source_skips_empty_pages() {
        let source = Arc::new(MemorySource::with_entries(150));
        let index = Arc::new(MemoryIndex::new());

        let report = orchestrator(source.clone(), index.clone(), 100, TotalPolicy::Fixed(300))
            .run()
            .await
            .unwrap();

        assert_eq!(source.fetches(), vec![(0, 100), (100, 100), (200, 100)]);
        assert_eq!(index.batch_sizes(), vec![100, 50]);
        assert_eq!(report.pages, 3);
        assert_eq!(report.submitted, 150);
    }

    #[tokio::test]
    async fn test_empty_source_submits_nothing() {
        let source = Arc::new(MemorySource::with_entries(0));
        let index = Arc::new(MemoryIndex::new());

        let report = orchestrator(source.clone(), index.clone(), 100, TotalPolicy::Count)
            .run()
            .await
            .unwrap();

        assert!(source.fetches().is_empty());
        assert!(index.batch_sizes().is_empty());
        assert_eq!(report.submitted, 0);
    }

    #[tokio::test]
    async fn test_rejected_items_do_not_stop_next_page() {
        let source = Arc::new(MemorySource::with_entries(150));
        let index = Arc::new(MemoryIndex {
            reject: vec!["5".to_string(), "42".to_string()],
            ..MemoryIndex::new()
        });

        let report = orchestrator(source.clone(), index.clone(), 100, TotalPolicy::Count)
            .run()
            .await
            .unwrap();

        assert_eq!(index.batch_sizes(), vec![100, 50]);
        assert_eq!(report.failed, 2);
        assert_eq!(report.submitted, 150);
        assert_eq!(index.snapshot().len(), 148);
    }

    #[tokio::test]
    async fn test_source_error_aborts_run() {
        let source = Arc::new(MemorySource {
            fail_at_skip: Some(100),
            ..MemorySource::with_entries(250)
        });
        let index = Arc::new(MemoryIndex::new());

        let result = orchestrator(source.clone(), index.clone(), 100, TotalPolicy::Count)
            .run()
            .await;

        assert!(matches!(result, Err(PipelineError::SourceError(_))));
        assert_eq!(source.fetches().len(), 2);
        assert_eq!(index.batch_sizes(), vec![100]);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let source = Arc::new(MemorySource::with_entries(10));
        let index = Arc::new(MemoryIndex::new());

        let result = orchestrator(source.clone(), index, 0, TotalPolicy::Count).run().await;

        assert!(matches!(result, Err(PipelineError::ConfigError(_))));
        assert!(source.fetches().is_empty());
    }

    #[tokio::test]
    async fn test_timelines_are_looked_up_per_entry() {
        let mut with_timeline = ActivityFeedEntry::new(RecordId::Int(1));
        with_timeline.timeline_ref = Some(RecordId::Text("t-1".to_string()));
        let mut dangling = ActivityFeedEntry::new(RecordId::Int(2));
        dangling.timeline_ref = Some(RecordId::Text("missing".to_string()));
        let unlinked = ActivityFeedEntry::new(RecordId::Int(3));

        let mut timeline = Timeline::new(RecordId::Text("t-1".to_string()));
        timeline.advisor_id = Some(vec![0xCA, 0xFE]);
        timeline.extra.insert("kind".to_string(), json!("plan"));

        let mut source = MemorySource::new(vec![with_timeline, dangling, unlinked]);
        source.timelines.insert(timeline.id.clone(), timeline);
        let source = Arc::new(source);
        let index = Arc::new(MemoryIndex::new());

        orchestrator(source.clone(), index.clone(), 100, TotalPolicy::Count)
            .run()
            .await
            .unwrap();

        let stored = index.snapshot();
        assert_eq!(stored["1"]["timeline"]["_id"], "t-1");
        assert_eq!(stored["1"]["timeline"]["advisor_id"], "cafe");
        assert_eq!(stored["1"]["timeline"]["kind"], "plan");
        assert_eq!(stored["2"]["timeline"], json!({}));
        assert_eq!(stored["3"]["timeline"], json!({}));
        // The unlinked entry needs no lookup.
        assert_eq!(source.lookups.load(Ordering::SeqCst), 2);
    }

    fn uuid_id(hex: &str, base64: &str) -> RecordId {
        RecordId::Other {
            key: hex.to_string(),
            extjson: json!({ "$binary": { "base64": base64, "subType": "04" } }).to_string(),
        }
    }

    #[tokio::test]
    async fn test_uuid_ids_are_indexed_and_linked() {
        let entry_id = "11".repeat(16);
        let timeline_id = "22".repeat(16);
        let mut entry = ActivityFeedEntry::new(uuid_id(&entry_id, "EREREREREREREREREREREQ=="));
        entry.timeline_ref = Some(uuid_id(&timeline_id, "IiIiIiIiIiIiIiIiIiIiIg=="));
        let after = ActivityFeedEntry::new(RecordId::Int(5));

        let mut timeline = Timeline::new(uuid_id(&timeline_id, "IiIiIiIiIiIiIiIiIiIiIg=="));
        timeline.extra.insert("title".to_string(), json!("Onboarding"));

        let mut source = MemorySource::new(vec![entry, after]);
        source.timelines.insert(timeline.id.clone(), timeline);
        let source = Arc::new(source);
        let index = Arc::new(MemoryIndex::new());

        let report = orchestrator(source.clone(), index.clone(), 100, TotalPolicy::Count)
            .run()
            .await
            .unwrap();

        assert_eq!(report.submitted, 2);
        let stored = index.snapshot();
        assert_eq!(stored[&entry_id]["timeline"]["_id"], json!(timeline_id));
        assert_eq!(stored[&entry_id]["timeline"]["title"], "Onboarding");
        assert!(stored.contains_key("5"));
        assert_eq!(source.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rerun_overwrites_instead_of_duplicating() {
        let source = Arc::new(MemorySource::with_entries(120));
        let index = Arc::new(MemoryIndex::new());
        let run = orchestrator(source, index.clone(), 50, TotalPolicy::Count);

        run.run().await.unwrap();
        let first = index.snapshot();
        run.run().await.unwrap();
        let second = index.snapshot();

        assert_eq!(first.len(), 120);
        assert_eq!(first, second);
    }
}
