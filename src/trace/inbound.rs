use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// A host-delivered trace: the tag selects the widget, the payload configures
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl TraceEvent {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub role: String,
    #[serde(alias = "text", alias = "content")]
    pub message: String,
}

/// Widget configuration decoded from a trace payload.
///
/// Decoding never fails: a payload that is not an object (or a string
/// holding a JSON object) yields the empty configuration, and each field
/// that is missing or of the wrong shape falls back to its default on its
/// own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceConfig {
    pub message_id: Option<String>,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub transcript: Vec<TranscriptTurn>,
    pub webhook_url: Option<String>,
    pub auto_submit_delay_ms: Option<u64>,
    pub inactivity_delay_ms: Option<u64>,
    pub handoff_message: Option<String>,
}

impl TraceConfig {
    pub fn decode(payload: &Value) -> Self {
        let Some(map) = payload_object(payload) else {
            return Self::default();
        };

        Self {
            message_id: id_field(&map, &["messageId", "message_id"]),
            session_id: id_field(&map, &["sessionId", "session_id", "conversationId"]),
            user_id: id_field(&map, &["userId", "user_id"]),
            transcript: transcript_field(&map),
            webhook_url: string_field(&map, &["webhookUrl", "webhook_url", "webhook"]),
            auto_submit_delay_ms: delay_field(&map, &["autoSubmitDelay", "auto_submit_delay_ms"]),
            inactivity_delay_ms: delay_field(&map, &["inactivityDelay", "inactivity_delay_ms"]),
            handoff_message: string_field(&map, &["handoffMessage", "message"]),
        }
    }
}

fn payload_object(payload: &Value) -> Option<Map<String, Value>> {
    match payload {
        Value::Object(map) => Some(map.clone()),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => {
                debug!("trace payload string is not a JSON object; using defaults");
                None
            }
            Err(e) => {
                debug!(error = %e, "trace payload string failed to parse; using defaults");
                None
            }
        },
        Value::Null => None,
        _ => {
            debug!("trace payload has unexpected shape; using defaults");
            None
        }
    }
}

fn first<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k))
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match first(map, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Identifiers arrive as strings or numbers depending on the host.
fn id_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match first(map, keys)? {
        Value::Number(n) => Some(n.to_string()),
        _ => string_field(map, keys),
    }
}

/// Positive millisecond delays, given as numbers or numeric strings.
fn delay_field(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    let ms = match first(map, keys)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (ms > 0).then_some(ms)
}

fn transcript_field(map: &Map<String, Value>) -> Vec<TranscriptTurn> {
    let Some(Value::Array(items)) = first(map, &["transcript", "history"]) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value::<TranscriptTurn>(item.clone()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_object_payload() {
        let config = TraceConfig::decode(&json!({
            "messageId": "m-1",
            "sessionId": "s-1",
            "userId": 42,
            "webhookUrl": "https://hooks.example/fb",
            "autoSubmitDelay": 5000,
            "inactivityDelay": "1500",
            "transcript": [
                {"role": "user", "message": "hi"},
                {"role": "assistant", "text": "hello"},
                {"nonsense": true}
            ]
        }));

        assert_eq!(config.message_id.as_deref(), Some("m-1"));
        assert_eq!(config.session_id.as_deref(), Some("s-1"));
        assert_eq!(config.user_id.as_deref(), Some("42"));
        assert_eq!(config.webhook_url.as_deref(), Some("https://hooks.example/fb"));
        assert_eq!(config.auto_submit_delay_ms, Some(5000));
        assert_eq!(config.inactivity_delay_ms, Some(1500));
        assert_eq!(config.transcript.len(), 2);
        assert_eq!(config.transcript[1].message, "hello");
    }

    #[test]
    fn decodes_json_string_payload() {
        let config = TraceConfig::decode(&Value::String(
            r#"{"messageId":"m-2","autoSubmitDelay":100}"#.into(),
        ));
        assert_eq!(config.message_id.as_deref(), Some("m-2"));
        assert_eq!(config.auto_submit_delay_ms, Some(100));
    }

    #[test]
    fn malformed_string_falls_back_to_empty() {
        let config = TraceConfig::decode(&Value::String("{not json".into()));
        assert_eq!(config, TraceConfig::default());
    }

    #[test]
    fn non_object_payloads_fall_back_to_empty() {
        for payload in [Value::Null, json!(7), json!(["a"]), json!("\"just a string\"")] {
            assert_eq!(TraceConfig::decode(&payload), TraceConfig::default());
        }
    }

    #[test]
    fn bad_fields_fall_back_individually() {
        let config = TraceConfig::decode(&json!({
            "messageId": "m-3",
            "autoSubmitDelay": "soon",
            "inactivityDelay": 0,
            "webhookUrl": "   ",
            "transcript": "not a list"
        }));
        assert_eq!(config.message_id.as_deref(), Some("m-3"));
        assert_eq!(config.auto_submit_delay_ms, None);
        assert_eq!(config.inactivity_delay_ms, None);
        assert_eq!(config.webhook_url, None);
        assert!(config.transcript.is_empty());
    }

    #[test]
    fn trace_event_deserializes_type_tag() {
        let event: TraceEvent =
            serde_json::from_value(json!({"type": "feedback", "payload": "{}"})).unwrap();
        assert_eq!(event.kind, "feedback");
        assert_eq!(event.payload, json!("{}"));

        let bare: TraceEvent = serde_json::from_value(json!({"type": "force_handoff"})).unwrap();
        assert_eq!(bare.payload, Value::Null);
    }
}
