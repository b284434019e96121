//! MongoDB feed source.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info, instrument};

use crate::config::SourceConfig;
use crate::errors::SourceError;
use crate::interfaces::FeedSource;
use crate::mongo::decode::{decode_entry, decode_timeline, record_id_to_bson};
use feed_indexer_shared::{ActivityFeedEntry, RecordId, Timeline};

/// Reads activity feed entries and timelines from MongoDB.
///
/// Pages are sorted by `_id` ascending so that skip/limit windows stay
/// well-defined across calls.
pub struct MongoFeedSource {
    database: Database,
    feed: Collection<Document>,
    timelines: Collection<Document>,
}

impl MongoFeedSource {
    /// Connect using a MongoDB connection string.
    ///
    /// The driver connects lazily; use [`FeedSource::health_check`] to verify
    /// the server is reachable.
    pub async fn connect(uri: &str, config: SourceConfig) -> Result<Self, SourceError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| SourceError::connection(e.to_string()))?;

        info!(
            database = %config.database,
            feed_collection = %config.feed_collection,
            timeline_collection = %config.timeline_collection,
            "Created MongoDB client"
        );

        Ok(Self::from_client(&client, &config))
    }

    /// Build a source on an existing client.
    pub fn from_client(client: &Client, config: &SourceConfig) -> Self {
        let database = client.database(&config.database);
        let feed = database.collection::<Document>(&config.feed_collection);
        let timelines = database.collection::<Document>(&config.timeline_collection);

        Self {
            database,
            feed,
            timelines,
        }
    }
}

#[async_trait]
impl FeedSource for MongoFeedSource {
    async fn count_entries(&self) -> Result<u64, SourceError> {
        self.feed
            .count_documents(doc! {})
            .await
            .map_err(|e| SourceError::query(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn fetch_page(&self, skip: u64, limit: u64) -> Result<Vec<ActivityFeedEntry>, SourceError> {
        let limit = i64::try_from(limit)
            .map_err(|_| SourceError::query(format!("page size {} out of range", limit)))?;

        let cursor = self
            .feed
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| SourceError::query(e.to_string()))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| SourceError::query(e.to_string()))?;

        debug!(count = documents.len(), "Fetched feed page");

        documents.into_iter().map(decode_entry).collect()
    }

    async fn find_timeline(&self, id: &RecordId) -> Result<Option<Timeline>, SourceError> {
        let filter = doc! { "_id": record_id_to_bson(id)? };
        self.timelines
            .find_one(filter)
            .await
            .map_err(|e| SourceError::query(e.to_string()))?
            .map(decode_timeline)
            .transpose()
    }

    async fn health_check(&self) -> Result<bool, SourceError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| SourceError::connection(e.to_string()))?;

        Ok(true)
    }
}
