use super::{WebhookSink, build_webhook_client};
use crate::config::DeliveryConfig;
use crate::error::DeliveryError;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// Single-attempt JSON POST over reqwest.
pub struct HttpWebhook {
    client: Client,
}

impl HttpWebhook {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &DeliveryConfig) -> Self {
        Self::new(build_webhook_client(config))
    }

    async fn post(&self, url: &str, payload: &Value) -> Result<(), DeliveryError> {
        let parsed = url::Url::parse(url).map_err(|e| DeliveryError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DeliveryError::InvalidUrl {
                url: url.to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let response = self
            .client
            .post(parsed.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "webhook answered");
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

impl WebhookSink for HttpWebhook {
    fn name(&self) -> &str {
        "http"
    }

    fn deliver<'a>(
        &'a self,
        url: &'a str,
        payload: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>> {
        Box::pin(self.post(url, payload))
    }
}
