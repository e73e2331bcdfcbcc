use crate::trace::TraceConfig;
use chrono::{DateTime, Utc};

/// Identity of one rendering of a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceMeta {
    pub id: String,
    pub family: String,
    pub rendered_at: DateTime<Utc>,
    pub message_id: Option<String>,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
}

impl InstanceMeta {
    /// Derive a stable id from the host's conversation and message ids.
    ///
    /// With both present the id is reproducible across re-deliveries of the
    /// same trace. Anything less gets a random suffix.
    pub fn derive(family: &str, trace: &TraceConfig) -> Self {
        let id = match (&trace.session_id, &trace.message_id) {
            (Some(session), Some(message)) => format!("{family}-{session}-{message}"),
            (None, Some(message)) => format!("{family}-{message}"),
            (Some(session), None) => format!("{family}-{session}-{}", short_uuid()),
            (None, None) => format!("{family}-{}", short_uuid()),
        };
        Self {
            id,
            family: family.to_string(),
            rendered_at: Utc::now(),
            message_id: trace.message_id.clone(),
            session_id: trace.session_id.clone(),
            user_id: trace.user_id.clone(),
        }
    }
}

fn short_uuid() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}
