use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Webhook receiving feedback payloads; a trace payload may override it
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Delay for both the dismiss timer and the auto-submit timer (default: 20000)
    #[serde(default = "default_auto_submit_delay_ms")]
    pub auto_submit_delay_ms: u64,
    /// Debounce applied while the user is typing a comment (default: 15000)
    #[serde(default = "default_inactivity_delay_ms")]
    pub inactivity_delay_ms: u64,
}

fn default_auto_submit_delay_ms() -> u64 {
    20_000
}

fn default_inactivity_delay_ms() -> u64 {
    15_000
}

impl FeedbackConfig {
    pub fn auto_submit_delay(&self) -> Duration {
        Duration::from_millis(self.auto_submit_delay_ms)
    }

    pub fn inactivity_delay(&self) -> Duration {
        Duration::from_millis(self.inactivity_delay_ms)
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            auto_submit_delay_ms: default_auto_submit_delay_ms(),
            inactivity_delay_ms: default_inactivity_delay_ms(),
        }
    }
}
