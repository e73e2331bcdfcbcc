use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TRACEWIDGETS_FEEDBACK_WEBHOOK")
            && !url.is_empty()
        {
            self.feedback.webhook_url = Some(url);
        }

        if let Ok(url) = std::env::var("TRACEWIDGETS_LEAD_WEBHOOK")
            && !url.is_empty()
        {
            self.wizard.webhook_url = Some(url);
        }

        if let Ok(raw) = std::env::var("TRACEWIDGETS_COOLDOWN_MS")
            && let Ok(ms) = raw.parse::<u64>()
        {
            self.render.cooldown_ms = ms;
        }

        if let Ok(backend) = std::env::var("TRACEWIDGETS_OBSERVABILITY")
            && !backend.is_empty()
        {
            self.observability.backend = backend;
        }
    }
}
