//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using OpenSearch as the backend. The bulk wire format is shared with
//! Elasticsearch.

mod bulk;
mod client;
mod index_config;

pub use bulk::{build_bulk_body, parse_bulk_response};
pub use client::OpenSearchClient;
pub use index_config::{get_index_settings, IndexConfig, DEFAULT_INDEX_NAME};
