use super::super::{DeliveryConfig, FeedbackConfig, ObservabilityConfig, RenderConfig, WizardConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,

    #[serde(default)]
    pub wizard: WizardConfig,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Reject values that would make the lifecycle misbehave rather than
    /// merely degrade: zero delays and unparsable webhook URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feedback.auto_submit_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "feedback.auto_submit_delay_ms must be greater than zero".into(),
            ));
        }
        if self.feedback.inactivity_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "feedback.inactivity_delay_ms must be greater than zero".into(),
            ));
        }
        if self.delivery.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "delivery.timeout_secs must be greater than zero".into(),
            ));
        }
        for (key, value) in [
            ("feedback.webhook_url", &self.feedback.webhook_url),
            ("wizard.webhook_url", &self.wizard.webhook_url),
        ] {
            if let Some(raw) = value
                && let Err(e) = url::Url::parse(raw)
            {
                return Err(ConfigError::Validation(format!("{key}: {e}")));
            }
        }
        match self.observability.backend.as_str() {
            "log" | "none" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "observability.backend '{other}' is not one of: log, none"
            ))),
        }
    }
}
