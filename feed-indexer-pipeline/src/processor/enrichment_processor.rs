//! Enrichment processor implementation.
//!
//! Flattens an activity feed entry and its related timeline into an
//! `EnrichedDocument`: binary ids become lowercase hex, timestamps become
//! ISO-8601 text, and absent values become `null`.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use feed_indexer_shared::format::{to_hex, to_iso8601};
use feed_indexer_shared::{ActivityFeedEntry, EnrichedDocument, EnrichedTimeline, Timeline};

/// Render an optional binary id as lowercase hex.
pub fn hex_id(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(to_hex)
}

/// Render an optional timestamp as ISO-8601 UTC.
pub fn iso_timestamp(instant: Option<&DateTime<Utc>>) -> Option<String> {
    instant.map(to_iso8601)
}

/// Processor that transforms source records into search documents.
pub struct EnrichmentProcessor {}

impl EnrichmentProcessor {
    /// Create a new enrichment processor.
    pub fn new() -> Self {
        Self {}
    }

    /// Enrich one entry with its related timeline.
    ///
    /// A missing timeline yields a document whose `timeline` serializes as `{}`.
    pub fn enrich(&self, entry: ActivityFeedEntry, timeline: Option<Timeline>) -> EnrichedDocument {
        EnrichedDocument {
            id: entry.document_key(),
            user_id: hex_id(entry.user_id.as_deref()),
            company_id: hex_id(entry.company_id.as_deref()),
            advisor_id: hex_id(entry.advisor_id.as_deref()),
            kind: entry.kind,
            timeline: timeline.map(|timeline| self.enrich_timeline(timeline)),
            status: entry.status,
            created_at: iso_timestamp(entry.created_at.as_ref()),
        }
    }

    /// Enrich a page of entries paired with their timelines.
    #[instrument(skip(self, entries), fields(entry_count = entries.len()))]
    pub fn process_batch(
        &self,
        entries: Vec<(ActivityFeedEntry, Option<Timeline>)>,
    ) -> Vec<EnrichedDocument> {
        let documents: Vec<EnrichedDocument> = entries
            .into_iter()
            .map(|(entry, timeline)| self.enrich(entry, timeline))
            .collect();

        debug!(processed_count = documents.len(), "Processed entry batch");
        documents
    }

    fn enrich_timeline(&self, timeline: Timeline) -> EnrichedTimeline {
        EnrichedTimeline {
            id: timeline.id.to_string(),
            user_id: hex_id(timeline.user_id.as_deref()),
            company_id: hex_id(timeline.company_id.as_deref()),
            advisor_id: hex_id(timeline.advisor_id.as_deref()),
            created_at: iso_timestamp(timeline.created_at.as_ref()),
            extra: timeline.extra,
        }
    }
}

impl Default for EnrichmentProcessor {
    fn default() -> Self {
        Self::new()
    }
}
