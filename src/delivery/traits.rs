use crate::error::DeliveryError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Destination for completion payloads.
///
/// One call is one attempt: implementations must not retry.
pub trait WebhookSink: Send + Sync {
    /// Human-readable sink name
    fn name(&self) -> &str;

    /// POST `payload` as JSON to `url`.
    fn deliver<'a>(
        &'a self,
        url: &'a str,
        payload: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>>;
}
