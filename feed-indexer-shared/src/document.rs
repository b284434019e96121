//! Enriched documents written to the search index.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// The display-safe document indexed for one activity feed entry.
///
/// Identifier fields hold lowercase hex and timestamps hold ISO-8601 text.
/// Both serialize as `null` when absent so the keys are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDocument {
    /// Index key; the source entry's id in string form. Not part of the body.
    #[serde(skip)]
    pub id: String,
    pub user_id: Option<String>,
    pub company_id: Option<String>,
    pub advisor_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    /// The related timeline, or `{}` when the entry has none.
    #[serde(serialize_with = "serialize_timeline")]
    pub timeline: Option<EnrichedTimeline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

/// A timeline record rendered with the same rules as its entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTimeline {
    /// Pass-through fields of the source record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: Option<String>,
    pub company_id: Option<String>,
    pub advisor_id: Option<String>,
    pub created_at: Option<String>,
}

fn serialize_timeline<S>(
    timeline: &Option<EnrichedTimeline>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match timeline {
        Some(timeline) => timeline.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

impl EnrichedDocument {
    /// Serialize the document body for indexing.
    pub fn to_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
