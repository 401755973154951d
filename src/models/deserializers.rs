use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for timestamp that accepts both integers (ms) and RFC3339 strings
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use crate::models::{HistoryEntry, LanguageTag};

    #[test]
    fn test_history_entry_timestamp_rfc3339() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "prompt": "reverse a string",
            "code": "s[::-1]",
            "language": "python",
            "timestamp": "2025-11-02T09:41:20.016Z",
            "favorite": true
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.prompt, "reverse a string");
        assert_eq!(entry.language, LanguageTag::Python);
        assert_eq!(entry.id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        assert!(entry.favorite);
    }

    #[test]
    fn test_history_entry_timestamp_integer() {
        let json = r#"{
            "prompt": "sum two numbers",
            "code": "a + b",
            "language": "go",
            "timestamp": 1762076480016,
            "favorite": false
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        let expected_ts = DateTime::from_timestamp_millis(1762076480016).unwrap();
        assert_eq!(entry.timestamp, expected_ts);
    }

    #[test]
    fn test_history_entry_without_id_or_favorite() {
        let json = r#"{
            "prompt": "p",
            "code": "c",
            "language": "ruby",
            "timestamp": "2025-01-01T00:00:00Z"
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.favorite);
        assert!(entry.id.is_nil());
    }

    #[test]
    fn test_history_entry_rejects_bad_timestamp() {
        let json = r#"{"prompt":"p","code":"c","language":"go","timestamp":true}"#;
        assert!(serde_json::from_str::<HistoryEntry>(json).is_err());

        let json = r#"{"prompt":"p","code":"c","language":"go","timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<HistoryEntry>(json).is_err());
    }

    #[test]
    fn test_history_entry_rejects_missing_code() {
        let json = r#"{"prompt":"p","language":"go","timestamp":"2025-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<HistoryEntry>(json).is_err());
    }
}
