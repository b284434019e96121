//! Display-safe renderings of binary ids and timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Render bytes as lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Render an instant as ISO-8601 UTC with millisecond precision,
/// e.g. `2024-03-01T10:00:00.000Z`.
pub fn to_iso8601(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert milliseconds since the Unix epoch into an instant.
///
/// Returns `None` when the value is outside the representable range.
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hex_is_lowercase_and_decodes_back() {
        let bytes = [0x00, 0xAB, 0x10, 0xFF, 0x7E];
        let encoded = to_hex(&bytes);

        assert_eq!(encoded, "00ab10ff7e");
        assert_eq!(hex::decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_hex_of_empty_bytes() {
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn test_iso8601_format() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 5).unwrap();
        assert_eq!(to_iso8601(&instant), "2024-03-01T10:00:05.000Z");
    }

    #[test]
    fn test_iso8601_parses_back_to_same_instant() {
        let instant = from_epoch_millis(1_700_000_123_456).unwrap();
        let rendered = to_iso8601(&instant);

        assert_eq!(rendered, "2023-11-14T22:15:23.456Z");
        let parsed = DateTime::parse_from_rfc3339(&rendered).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), instant);
    }

    #[test]
    fn test_epoch_millis_out_of_range() {
        assert!(from_epoch_millis(i64::MAX).is_none());
    }
}
