//! Source store trait definition.

use async_trait::async_trait;

use crate::errors::SourceError;
use feed_indexer_shared::{ActivityFeedEntry, RecordId, Timeline};

/// Read-only access to the activity feed and its timelines.
///
/// Implementations never mutate the store.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Count all activity feed entries.
    async fn count_entries(&self) -> Result<u64, SourceError>;

    /// Fetch the entries in the window `[skip, skip + limit)`.
    ///
    /// The order must be stable across calls so consecutive windows neither
    /// overlap nor skip entries. A window past the end returns an empty page.
    async fn fetch_page(&self, skip: u64, limit: u64) -> Result<Vec<ActivityFeedEntry>, SourceError>;

    /// Look up a single timeline by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Timeline))` - If the timeline exists
    /// * `Ok(None)` - If no timeline has this id
    /// * `Err(SourceError)` - If the lookup or decoding fails
    async fn find_timeline(&self, id: &RecordId) -> Result<Option<Timeline>, SourceError>;

    /// Check if the store is reachable.
    async fn health_check(&self) -> Result<bool, SourceError>;
}
