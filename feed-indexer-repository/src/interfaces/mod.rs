//! Interface definitions for the source store and the search engine.
//!
//! The pipeline depends only on these traits, so the MongoDB and OpenSearch
//! implementations can be swapped for in-memory ones in tests.

mod feed_source;
mod search_engine_client;

pub use feed_source::FeedSource;
pub use search_engine_client::SearchEngineClient;
