use super::Provenance;
use crate::lifecycle::InstanceMeta;
use crate::trace::TranscriptTurn;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// JSON document POSTed when feedback completes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    pub widget: &'static str,
    pub instance_id: String,
    pub message_id: Option<String>,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub skipped: bool,
    pub auto_submitted: bool,
    pub provenance: Provenance,
    pub transcript: Vec<TranscriptTurn>,
    pub rendered_at: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackPayload {
    pub fn build(
        instance: &InstanceMeta,
        rating: Option<u8>,
        comment: &str,
        provenance: Provenance,
        transcript: &[TranscriptTurn],
    ) -> Self {
        let comment = comment.trim();
        Self {
            widget: super::TAG,
            instance_id: instance.id.clone(),
            message_id: instance.message_id.clone(),
            session_id: instance.session_id.clone(),
            user_id: instance.user_id.clone(),
            rating,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
            skipped: provenance.skipped(),
            auto_submitted: provenance.auto_submitted(),
            provenance,
            transcript: transcript.to_vec(),
            rendered_at: instance.rendered_at,
            timestamp: Utc::now(),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
