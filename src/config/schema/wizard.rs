use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Webhook receiving captured leads; a trace payload may override it
    #[serde(default)]
    pub webhook_url: Option<String>,
}
