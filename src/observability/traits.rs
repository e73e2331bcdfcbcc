use crate::lifecycle::TimerKind;
use std::time::Duration;

/// Events the observer can record
#[derive(Debug, Clone)]
pub enum ObserverEvent {
    RenderStarted {
        family: String,
        instance_id: String,
    },
    RenderSuppressed {
        family: String,
        since_last: Duration,
    },
    StaleInstanceRemoved {
        family: String,
        node: String,
    },
    TimerFired {
        instance_id: String,
        timer: TimerKind,
    },
    Completed {
        family: String,
        instance_id: String,
        outcome: String,
    },
    DeliveryFailed {
        family: String,
        instance_id: String,
        message: String,
    },
    HostDegraded {
        operation: String,
        message: String,
    },
    Disposed {
        family: String,
        instance_id: String,
        reason: String,
    },
}

/// Numeric metrics
#[derive(Debug, Clone)]
pub enum ObserverMetric {
    DeliveryLatency(Duration),
    ActiveSessions(u64),
}

/// Sink for lifecycle events and metrics
pub trait Observer: Send + Sync {
    /// Record a discrete event
    fn record_event(&self, event: &ObserverEvent);

    /// Record a numeric metric
    fn record_metric(&self, metric: &ObserverMetric);

    /// Flush any buffered data (no-op for most backends)
    fn flush(&self) {}

    /// Human-readable name of this observer
    fn name(&self) -> &str;
}
