//! Bulk request encoding and response parsing.
//!
//! A bulk body is a sequence of JSON lines: an action line
//! `{"index": {"_index": .., "_id": ..}}` followed by the document body.

use serde_json::{json, Value};

use crate::errors::SearchError;
use crate::types::{BulkItemResult, BulkResponse};
use feed_indexer_shared::EnrichedDocument;

/// Build the interleaved action/body lines for indexing `documents` into `index`.
pub fn build_bulk_body(index: &str, documents: &[EnrichedDocument]) -> Result<Vec<Value>, SearchError> {
    let mut body = Vec::with_capacity(documents.len() * 2);

    for doc in documents {
        body.push(json!({ "index": { "_index": index, "_id": doc.id } }));
        body.push(doc.to_body()?);
    }

    Ok(body)
}

/// Parse the body of a bulk response.
///
/// Each entry of `items` is keyed by its action (`index`, `create`, ...);
/// the action key itself is ignored.
pub fn parse_bulk_response(body: &Value) -> Result<BulkResponse, SearchError> {
    let errors = body
        .get("errors")
        .and_then(Value::as_bool)
        .ok_or_else(|| SearchError::parse("bulk response is missing `errors`"))?;

    let raw_items = body.get("items").cloned().unwrap_or(Value::Array(Vec::new()));
    let items = raw_items
        .as_array()
        .map(|items| items.iter().filter_map(parse_item).collect())
        .unwrap_or_default();

    Ok(BulkResponse {
        errors,
        items,
        raw_items,
    })
}

fn parse_item(item: &Value) -> Option<BulkItemResult> {
    let (_, result) = item.as_object()?.iter().next()?;

    let document_id = match result.get("_id") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let status = result
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|status| u16::try_from(status).ok())
        .unwrap_or(0);
    let error = result.get("error").filter(|e| !e.is_null()).cloned();

    Some(BulkItemResult {
        document_id,
        status,
        error,
    })
}
