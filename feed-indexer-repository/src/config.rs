//! Configuration types for the source store.

/// Default database holding the activity feed.
pub const DEFAULT_DATABASE: &str = "vb";

/// Default activity feed collection.
pub const DEFAULT_FEED_COLLECTION: &str = "advisor_activity_feed";

/// Default timeline collection.
pub const DEFAULT_TIMELINE_COLLECTION: &str = "timeline";

/// Location of the activity feed and timeline collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Database name.
    pub database: String,
    /// Collection of activity feed entries.
    pub feed_collection: String,
    /// Collection of timelines referenced by the feed.
    pub timeline_collection: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            feed_collection: DEFAULT_FEED_COLLECTION.to_string(),
            timeline_collection: DEFAULT_TIMELINE_COLLECTION.to_string(),
        }
    }
}
