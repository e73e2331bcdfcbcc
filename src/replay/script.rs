use crate::trace::TraceEvent;
use crate::widgets::WidgetInput;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scripted host or user action.
///
/// `target` names a widget instance id; when omitted the most recently
/// mounted instance is used. A repeated id resolves to its newest mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Deliver a trace to the runtime.
    Trace(TraceEvent),
    Input {
        #[serde(default)]
        target: Option<String>,
        input: WidgetInput,
    },
    /// Let time pass.
    Wait { ms: u64 },
    /// Pull the node out of the surface without disposing it.
    Detach {
        #[serde(default)]
        target: Option<String>,
    },
    /// Call the instance's disposer.
    Dispose {
        #[serde(default)]
        target: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse replay script")
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        Self::parse(&raw)
    }
}
