//! Processor module for the reindex pipeline.
//!
//! Transforms activity feed entries and their timelines into enriched documents.

mod enrichment_processor;

pub use enrichment_processor::{hex_id, iso_timestamp, EnrichmentProcessor};
