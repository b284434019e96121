//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the enriched
//! activity feed index.

use serde_json::{json, Value};

/// The default name of the enriched activity feed index.
pub const DEFAULT_INDEX_NAME: &str = "advisor_activity_feed_enriched";

/// Target index of the reindex run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Name of the index documents are written to.
    pub name: String,
}

impl IndexConfig {
    /// Create a config for the named index.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

/// Get the index settings and mappings for the enriched activity feed index.
///
/// The configuration includes:
/// - **Keyword fields**: hex identifiers, for filtering and exact lookups
/// - **Date fields**: `createdAt` and the timeline's `created_at`
/// - **Dynamic timeline object**: pass-through fields are mapped on first sight
///
/// `type` and `status` are left to dynamic mapping since their shape is not fixed.
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "user_id": { "type": "keyword" },
                "company_id": { "type": "keyword" },
                "advisor_id": { "type": "keyword" },
                "createdAt": { "type": "date" },
                "timeline": {
                    "type": "object",
                    "dynamic": true,
                    "properties": {
                        "_id": { "type": "keyword" },
                        "user_id": { "type": "keyword" },
                        "company_id": { "type": "keyword" },
                        "advisor_id": { "type": "keyword" },
                        "created_at": { "type": "date" }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        let properties = &settings["mappings"]["properties"];
        for field in ["user_id", "company_id", "advisor_id"] {
            assert_eq!(properties[field]["type"], "keyword");
            assert_eq!(properties["timeline"]["properties"][field]["type"], "keyword");
        }
        assert_eq!(properties["createdAt"]["type"], "date");
        assert_eq!(properties["timeline"]["properties"]["created_at"]["type"], "date");
        assert_eq!(properties["timeline"]["dynamic"], true);
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(IndexConfig::default().name, "advisor_activity_feed_enriched");
    }
}
