//! Error types for the reindexer repository.

mod search_error;
mod source_error;

pub use search_error::SearchError;
pub use source_error::SourceError;
