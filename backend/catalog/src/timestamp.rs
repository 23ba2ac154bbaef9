//! Serde helper for `createdAt`.
//!
//! Written as epoch milliseconds so stores can order on it numerically. Read back from epoch
//! milliseconds, an RFC 3339 string, or a store-native `{seconds, nanoseconds}` object.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Millis(i64),
    Text(String),
    Native { seconds: i64, nanoseconds: u32 },
}

pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(timestamp.timestamp_millis())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Raw::deserialize(deserializer)? {
        Raw::Millis(millis) => DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {millis}"))),
        Raw::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(D::Error::custom),
        Raw::Native {
            seconds,
            nanoseconds,
        } => DateTime::from_timestamp(seconds, nanoseconds)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {seconds}s"))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    fn expected() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_writes_millis() {
        let value = serde_json::to_value(Stamped { at: expected() }).unwrap();
        assert_eq!(value, json!({ "at": expected().timestamp_millis() }));
    }

    #[test]
    fn test_reads_millis() {
        let stamped: Stamped =
            serde_json::from_value(json!({ "at": expected().timestamp_millis() })).unwrap();
        assert_eq!(stamped.at, expected());
    }

    #[test]
    fn test_reads_rfc3339() {
        let stamped: Stamped =
            serde_json::from_value(json!({ "at": "2025-01-02T03:04:05Z" })).unwrap();
        assert_eq!(stamped.at, expected());
    }

    #[test]
    fn test_reads_native() {
        let stamped: Stamped = serde_json::from_value(json!({
            "at": { "seconds": expected().timestamp(), "nanoseconds": 0 }
        }))
        .unwrap();
        assert_eq!(stamped.at, expected());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_value::<Stamped>(json!({ "at": "yesterday" })).is_err());
        assert!(serde_json::from_value::<Stamped>(json!({ "at": true })).is_err());
    }
}
