//! # Feed Indexer Pipeline
//!
//! This crate provides the pipeline components for reading activity feed
//! entries from the source store and indexing them into OpenSearch.
//!
//! ## Architecture
//!
//! 1. **Processor**: Transforms an entry and its timeline into an enriched document
//! 2. **Loader**: Submits one page of documents as a bulk request
//! 3. **Orchestrator**: Walks the source page by page and drives the other two

pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;

pub use errors::PipelineError;
