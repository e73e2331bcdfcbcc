use super::WebhookSink;
use crate::error::DeliveryError;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub url: String,
    pub payload: Value,
}

/// Records deliveries instead of sending them.
///
/// Used for dry runs and tests. Can be told to fail the next N attempts so
/// retry paths can be exercised.
pub struct MemorySink {
    deliveries: Mutex<Vec<Delivery>>,
    failures_left: Mutex<u32>,
    notify: Notify,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            failures_left: Mutex::new(0),
            notify: Notify::new(),
        }
    }

    /// Make the next `count` attempts fail with a 503.
    pub fn fail_next(&self, count: u32) {
        *self
            .failures_left
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = count;
    }

    /// Every attempt, failed ones included, oldest first.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.deliveries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Wait until at least `n` attempts were recorded.
    pub async fn wait_for(&self, n: usize) {
        loop {
            let notified = self.notify.notified();
            if self.count() >= n {
                return;
            }
            notified.await;
        }
    }

    fn record(&self, url: &str, payload: &Value) -> Result<(), DeliveryError> {
        self.deliveries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(Delivery {
                url: url.to_string(),
                payload: payload.clone(),
            });
        let mut failures = self
            .failures_left
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let result = if *failures > 0 {
            *failures -= 1;
            Err(DeliveryError::Status {
                url: url.to_string(),
                status: 503,
            })
        } else {
            Ok(())
        };
        drop(failures);
        self.notify.notify_waiters();
        result
    }
}

impl WebhookSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn deliver<'a>(
        &'a self,
        url: &'a str,
        payload: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>> {
        Box::pin(async move { self.record(url, payload) })
    }
}
