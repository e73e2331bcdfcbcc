use super::traits::{Observer, ObserverEvent, ObserverMetric};
use tracing::{info, warn};

/// Observer that writes every event as a tracing record
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LogObserver {
    fn record_event(&self, event: &ObserverEvent) {
        match event {
            ObserverEvent::RenderStarted {
                family,
                instance_id,
            } => {
                info!(family = %family, instance = %instance_id, "render.start");
            }
            ObserverEvent::RenderSuppressed { family, since_last } => {
                let ms = u64::try_from(since_last.as_millis()).unwrap_or(u64::MAX);
                info!(family = %family, since_last_ms = ms, "render.suppressed");
            }
            ObserverEvent::StaleInstanceRemoved { family, node } => {
                info!(family = %family, node = %node, "render.stale_removed");
            }
            ObserverEvent::TimerFired { instance_id, timer } => {
                info!(instance = %instance_id, timer = %timer, "timer.fired");
            }
            ObserverEvent::Completed {
                family,
                instance_id,
                outcome,
            } => {
                info!(family = %family, instance = %instance_id, outcome = %outcome, "widget.completed");
            }
            ObserverEvent::DeliveryFailed {
                family,
                instance_id,
                message,
            } => {
                warn!(family = %family, instance = %instance_id, error = %message, "delivery.failed");
            }
            ObserverEvent::HostDegraded { operation, message } => {
                info!(operation = %operation, error = %message, "host.degraded");
            }
            ObserverEvent::Disposed {
                family,
                instance_id,
                reason,
            } => {
                info!(family = %family, instance = %instance_id, reason = %reason, "widget.disposed");
            }
        }
    }

    fn record_metric(&self, metric: &ObserverMetric) {
        match metric {
            ObserverMetric::DeliveryLatency(d) => {
                let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
                info!(latency_ms = ms, "metric.delivery_latency");
            }
            ObserverMetric::ActiveSessions(s) => {
                info!(sessions = s, "metric.active_sessions");
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}
