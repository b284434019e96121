//! MongoDB implementation of the feed source.

mod client;
mod decode;

pub use client::MongoFeedSource;
pub use decode::{bson_to_json, decode_entry, decode_timeline, record_id_to_bson};
