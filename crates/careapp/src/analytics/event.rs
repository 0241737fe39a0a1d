//! Event records kept in the local log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary string-keyed data attached to an event.
pub type Payload = serde_json::Map<String, Value>;

/// A named interaction event.
///
/// Stored as `{"name": .., "payload": {..}, "ts": <millis>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name, e.g. `visit` or `tab_change`.
    pub name: String,
    /// Event-specific data.
    #[serde(default)]
    pub payload: Payload,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "ts")]
    pub timestamp: i64,
}

impl Event {
    /// Create an event.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: Payload, timestamp: i64) -> Self {
        Self {
            name: name.into(),
            payload,
            timestamp,
        }
    }

    /// The timestamp as a UTC date-time, if it is in range.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Build a payload from key/value pairs.
///
/// ```
/// use careapp::analytics::payload;
///
/// let p = payload([("tab", "timeline")]);
/// assert_eq!(p["tab"], "timeline");
/// ```
pub fn payload<K, V, I>(pairs: I) -> Payload
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_ts_key() {
        let event = Event::new("tab_change", payload([("tab", "home")]), 1_700_000_000_000);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["name"], "tab_change");
        assert_eq!(json["payload"]["tab"], "home");
        assert_eq!(json["ts"], 1_700_000_000_000_i64);
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_event_deserialize_without_payload() {
        let event: Event = serde_json::from_str(r#"{"name":"call_surgeon","ts":5}"#).unwrap();
        assert_eq!(event.name, "call_surgeon");
        assert!(event.payload.is_empty());
        assert_eq!(event.timestamp, 5);
    }

    #[test]
    fn test_event_deserialize_nested_payload() {
        let raw = r#"{"name":"x","payload":{"a":[1,2],"b":{"c":null}},"ts":9}"#;
        let event: Event = serde_json::from_str(raw).unwrap();
        assert_eq!(event.payload["a"][1], 2);
        assert!(event.payload["b"]["c"].is_null());
    }

    #[test]
    fn test_recorded_at() {
        let event = Event::new("visit", Payload::new(), 0);
        let at = event.recorded_at().unwrap();
        assert_eq!(at.timestamp(), 0);
    }

    #[test]
    fn test_payload_builder_mixed_values() {
        let p = payload([("count", Value::from(3)), ("page", Value::from("home"))]);
        assert_eq!(p.len(), 2);
        assert_eq!(p["count"], 3);
        assert_eq!(p["page"], "home");
    }
}
