//! Decoding of stored BSON documents into source records.
//!
//! Record ids accept any BSON value. Binary id fields accept BSON binary data
//! or object ids. Timestamp fields accept BSON dates. `null` and absent values
//! both decode to `None`; any other type is a decode error.

use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use crate::errors::SourceError;
use feed_indexer_shared::format::{from_epoch_millis, to_hex, to_iso8601};
use feed_indexer_shared::{ActivityFeedEntry, RecordId, Timeline};

const ID: &str = "_id";
const USER_ID: &str = "user_id";
const COMPANY_ID: &str = "company_id";
const ADVISOR_ID: &str = "advisor_id";
const TYPE: &str = "type";
const TIMELINE: &str = "timeline";
const STATUS: &str = "status";
const ENTRY_CREATED_AT: &str = "createdAt";
const TIMELINE_CREATED_AT: &str = "created_at";

/// Decode an activity feed document.
pub fn decode_entry(mut doc: Document) -> Result<ActivityFeedEntry, SourceError> {
    let id = required_id(&mut doc)?;

    Ok(ActivityFeedEntry {
        id,
        user_id: binary_id(USER_ID, doc.remove(USER_ID))?,
        company_id: binary_id(COMPANY_ID, doc.remove(COMPANY_ID))?,
        advisor_id: binary_id(ADVISOR_ID, doc.remove(ADVISOR_ID))?,
        kind: doc.remove(TYPE).map(bson_to_json),
        timeline_ref: match doc.remove(TIMELINE) {
            None | Some(Bson::Null) => None,
            Some(value) => Some(record_id(value)),
        },
        status: doc.remove(STATUS).map(bson_to_json),
        created_at: timestamp(ENTRY_CREATED_AT, doc.remove(ENTRY_CREATED_AT))?,
    })
}

/// Decode a timeline document. Fields other than the id, binary ids and
/// `created_at` are kept as pass-through JSON.
pub fn decode_timeline(mut doc: Document) -> Result<Timeline, SourceError> {
    let id = required_id(&mut doc)?;
    let user_id = binary_id(USER_ID, doc.remove(USER_ID))?;
    let company_id = binary_id(COMPANY_ID, doc.remove(COMPANY_ID))?;
    let advisor_id = binary_id(ADVISOR_ID, doc.remove(ADVISOR_ID))?;
    let created_at = timestamp(TIMELINE_CREATED_AT, doc.remove(TIMELINE_CREATED_AT))?;

    let extra: Map<String, Value> = doc
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();

    Ok(Timeline {
        id,
        user_id,
        company_id,
        advisor_id,
        created_at,
        extra,
    })
}

/// Convert a record id back into the BSON value stored in `_id`.
pub fn record_id_to_bson(id: &RecordId) -> Result<Bson, SourceError> {
    match id {
        RecordId::ObjectId(bytes) => Ok(Bson::ObjectId(ObjectId::from_bytes(*bytes))),
        RecordId::Text(text) => Ok(Bson::String(text.clone())),
        RecordId::Int(value) => Ok(Bson::Int64(*value)),
        RecordId::Other { key, extjson } => {
            let value: Value = serde_json::from_str(extjson)
                .map_err(|e| SourceError::decode(ID, format!("invalid id {}: {}", key, e)))?;
            Bson::try_from(value).map_err(|e| SourceError::decode(ID, format!("invalid id {}: {}", key, e)))
        }
    }
}

/// Render a BSON value as display-safe JSON.
///
/// Object ids become hex strings and dates become ISO-8601 strings, at any
/// depth. Everything else uses relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match from_epoch_millis(dt.timestamp_millis()) {
            Some(instant) => Value::String(to_iso8601(&instant)),
            None => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn required_id(doc: &mut Document) -> Result<RecordId, SourceError> {
    match doc.remove(ID) {
        Some(value) => Ok(record_id(value)),
        None => Err(SourceError::decode(ID, "missing")),
    }
}

fn record_id(value: Bson) -> RecordId {
    match value {
        Bson::ObjectId(oid) => RecordId::ObjectId(oid.bytes()),
        Bson::String(text) => RecordId::Text(text),
        Bson::Int32(value) => RecordId::Int(i64::from(value)),
        Bson::Int64(value) => RecordId::Int(value),
        other => {
            let key = match &other {
                Bson::Binary(binary) => to_hex(&binary.bytes),
                value => value.clone().into_relaxed_extjson().to_string(),
            };
            RecordId::Other {
                key,
                extjson: other.into_canonical_extjson().to_string(),
            }
        }
    }
}

fn binary_id(field: &str, value: Option<Bson>) -> Result<Option<Vec<u8>>, SourceError> {
    match value {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::Binary(binary)) => Ok(Some(binary.bytes)),
        Some(Bson::ObjectId(oid)) => Ok(Some(oid.bytes().to_vec())),
        Some(other) => Err(SourceError::decode(
            field,
            format!("expected binary id, found {:?}", other.element_type()),
        )),
    }
}

fn timestamp(field: &str, value: Option<Bson>) -> Result<Option<DateTime<Utc>>, SourceError> {
    match value {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::DateTime(dt)) => from_epoch_millis(dt.timestamp_millis())
            .map(Some)
            .ok_or_else(|| SourceError::decode(field, "date out of range")),
        Some(other) => Err(SourceError::decode(
            field,
            format!("expected date, found {:?}", other.element_type()),
        )),
    }
}
