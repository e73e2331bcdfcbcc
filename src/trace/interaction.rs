use crate::widgets::wizard::Priority;
use serde::{Deserialize, Serialize};

/// Closed set of outbound interaction names the host runtime understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionName {
    Complete,
    Navigate,
    LeadCaptured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionData {
    pub action: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTag {
    pub name: InteractionName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionPayload {
    pub event: EventTag,
    pub data: InteractionData,
}

/// `{ "type": "event", "payload": { "event": { "name" }, "data" } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: InteractionPayload,
}

impl InteractionEvent {
    pub fn new(name: InteractionName, data: InteractionData) -> Self {
        Self {
            kind: "event".into(),
            payload: InteractionPayload {
                event: EventTag { name },
                data,
            },
        }
    }

    pub fn name(&self) -> InteractionName {
        self.payload.event.name
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"event","payload":null}"#.to_string())
    }
}
