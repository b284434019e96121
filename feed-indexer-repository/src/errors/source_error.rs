//! Source store error types.

use thiserror::Error;

/// Errors that can occur while reading from the source document store.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to connect to the store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A read query failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A stored document could not be decoded into a source record.
    #[error("Decode error in field `{field}`: {reason}")]
    DecodeError { field: String, reason: String },
}

impl SourceError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a decode error for the named field.
    pub fn decode(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DecodeError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
