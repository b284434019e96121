//! Source records as read from the document store.
//!
//! These types are store-neutral: the repository layer decodes raw store
//! documents into them, so binary ids are plain bytes and timestamps are
//! already UTC instants.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Identifier of a record in the source store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// A 12-byte store-generated object id.
    ObjectId([u8; 12]),
    /// A string key.
    Text(String),
    /// An integer key.
    Int(i64),
    /// Any other store value used as a key, such as a UUID binary, a double or
    /// an embedded document.
    ///
    /// `key` is the string form: lowercase hex for binaries, otherwise the
    /// value as relaxed extended JSON. `extjson` holds the value as canonical
    /// extended JSON so the store can rebuild the exact value for lookups.
    Other { key: String, extjson: String },
}

impl fmt::Display for RecordId {
    /// Object ids and binaries render as lowercase hex, the same form the index uses as key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::ObjectId(bytes) => f.write_str(&crate::format::to_hex(bytes)),
            RecordId::Text(text) => f.write_str(text),
            RecordId::Int(value) => write!(f, "{}", value),
            RecordId::Other { key, .. } => f.write_str(key),
        }
    }
}

/// An activity feed entry describing an event tied to an advisor, company and user.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityFeedEntry {
    pub id: RecordId,
    pub user_id: Option<Vec<u8>>,
    pub company_id: Option<Vec<u8>>,
    pub advisor_id: Option<Vec<u8>>,
    /// Classification tag, carried through as-is.
    pub kind: Option<Value>,
    /// Reference to the related timeline record.
    pub timeline_ref: Option<RecordId>,
    /// Lifecycle tag, carried through as-is.
    pub status: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ActivityFeedEntry {
    /// Create an entry with the given id and every other field unset.
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            user_id: None,
            company_id: None,
            advisor_id: None,
            kind: None,
            timeline_ref: None,
            status: None,
            created_at: None,
        }
    }

    /// Key under which the enriched entry is indexed.
    pub fn document_key(&self) -> String {
        self.id.to_string()
    }
}

/// A timeline record referenced by activity feed entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub id: RecordId,
    pub user_id: Option<Vec<u8>>,
    pub company_id: Option<Vec<u8>>,
    pub advisor_id: Option<Vec<u8>>,
    pub created_at: Option<DateTime<Utc>>,
    /// Every other field of the record, already rendered to JSON.
    pub extra: Map<String, Value>,
}

impl Timeline {
    /// Create a timeline with the given id and no other fields.
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            user_id: None,
            company_id: None,
            advisor_id: None,
            created_at: None,
            extra: Map::new(),
        }
    }
}
