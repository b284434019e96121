//! # Feed Indexer Repository
//!
//! This crate provides traits and implementations for the two external
//! systems of a reindex run: the MongoDB source store and the OpenSearch
//! destination index. It includes definitions for errors, interfaces, and
//! the concrete implementations.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod mongo;
pub mod opensearch;
pub mod types;

pub use config::SourceConfig;
pub use errors::{SearchError, SourceError};
pub use interfaces::{FeedSource, SearchEngineClient};
pub use mongo::MongoFeedSource;
pub use opensearch::{IndexConfig, OpenSearchClient};
pub use types::{BulkIndexSummary, BulkItemResult, BulkResponse};
