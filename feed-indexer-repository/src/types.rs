//! Request and response types for bulk index operations.

use serde_json::Value;

/// Outcome of a single item in a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemResult {
    /// The document id the item was submitted under.
    pub document_id: String,
    /// HTTP-style status the index reported for this item.
    pub status: u16,
    /// Error body reported by the index, if the item failed.
    pub error: Option<Value>,
}

impl BulkItemResult {
    /// Whether the index rejected this item.
    pub fn is_failure(&self) -> bool {
        self.error.is_some() || self.status >= 300
    }
}

/// Parsed response of a bulk request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkResponse {
    /// Top-level flag set by the index when any item failed.
    pub errors: bool,
    /// Per-item results, in submission order.
    pub items: Vec<BulkItemResult>,
    /// The raw `items` array, kept for itemized failure reports.
    pub raw_items: Value,
}

impl BulkResponse {
    /// Items the index rejected.
    pub fn failures(&self) -> impl Iterator<Item = &BulkItemResult> {
        self.items.iter().filter(|item| item.is_failure())
    }
}

/// Summary of one submitted batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkIndexSummary {
    /// Number of documents submitted.
    pub total: usize,
    /// Number of documents the index accepted.
    pub succeeded: usize,
    /// Number of documents the index rejected.
    pub failed: usize,
    /// The rejected items.
    pub failures: Vec<BulkItemResult>,
}

impl BulkIndexSummary {
    /// Summarize a bulk response for a batch of `total` documents.
    pub fn from_response(total: usize, response: &BulkResponse) -> Self {
        let failures: Vec<BulkItemResult> = response.failures().cloned().collect();
        let failed = if response.errors && failures.is_empty() {
            // The index flagged errors without itemizing them.
            total
        } else {
            failures.len()
        };

        Self {
            total,
            succeeded: total.saturating_sub(failed),
            failed,
            failures,
        }
    }

    /// Whether every document in the batch was indexed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, status: u16, error: Option<Value>) -> BulkItemResult {
        BulkItemResult {
            document_id: id.to_string(),
            status,
            error,
        }
    }

    #[test]
    fn test_summary_counts_failed_items() {
        let response = BulkResponse {
            errors: true,
            items: vec![
                item("a", 201, None),
                item("b", 400, Some(json!({"type": "mapper_parsing_exception"}))),
                item("c", 200, None),
            ],
            raw_items: Value::Null,
        };

        let summary = BulkIndexSummary::from_response(3, &response);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].document_id, "b");
        assert!(!summary.is_success());
    }

    #[test]
    fn test_summary_all_succeeded() {
        let response = BulkResponse {
            errors: false,
            items: vec![item("a", 201, None), item("b", 200, None)],
            raw_items: Value::Null,
        };

        let summary = BulkIndexSummary::from_response(2, &response);
        assert!(summary.is_success());
        assert_eq!(summary.succeeded, 2);
    }

    #[test]
    fn test_summary_flagged_without_items_counts_whole_batch() {
        let response = BulkResponse {
            errors: true,
            items: Vec::new(),
            raw_items: Value::Null,
        };

        let summary = BulkIndexSummary::from_response(5, &response);
        assert_eq!(summary.failed, 5);
        assert_eq!(summary.succeeded, 0);
    }
}
