//! # Feed Indexer Shared
//!
//! Domain types shared by the reindexer crates: the records read from the
//! source store and the enriched documents written to the search index.

mod document;
pub mod format;
mod record;

pub use document::{EnrichedDocument, EnrichedTimeline};
pub use record::{ActivityFeedEntry, RecordId, Timeline};
