use super::{Experience, Intent, LeadFields, Priority, classify};
use crate::lifecycle::InstanceMeta;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// JSON document POSTed when the wizard submits.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub widget: &'static str,
    pub instance_id: String,
    pub message_id: Option<String>,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: String,
    pub country_code: Option<String>,
    pub intent: Option<Intent>,
    pub experience: Option<Experience>,
    pub travel_window: Option<String>,
    pub message: Option<String>,
    pub consent: bool,
    pub priority: Priority,
    pub intent_score: u8,
    pub experience_score: u8,
    /// 1 for the first try, incremented on every retry after a failure.
    pub attempt: u32,
    pub rendered_at: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl LeadPayload {
    pub fn build(instance: &InstanceMeta, fields: &LeadFields, attempt: u32) -> Self {
        Self {
            widget: super::TAG,
            instance_id: instance.id.clone(),
            message_id: instance.message_id.clone(),
            session_id: instance.session_id.clone(),
            user_id: instance.user_id.clone(),
            first_name: fields.first_name.trim().to_string(),
            last_name: fields.last_name.trim().to_string(),
            email: fields.email.trim().to_string(),
            phone: optional(&fields.phone),
            country: fields.country.trim().to_string(),
            country_code: fields.country_code.clone(),
            intent: fields.intent,
            experience: fields.experience,
            travel_window: optional(&fields.travel_window),
            message: optional(&fields.message),
            consent: fields.consent,
            priority: classify(fields.intent, fields.experience),
            intent_score: fields.intent.map_or(0, Intent::score),
            experience_score: fields.experience.map_or(0, Experience::score),
            attempt,
            rendered_at: instance.rendered_at,
            timestamp: Utc::now(),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
