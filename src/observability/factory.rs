use super::{LogObserver, NoopObserver, Observer};
use crate::config::ObservabilityConfig;
use std::sync::Arc;

/// Build the observer selected by `observability.backend`.
///
/// Unknown names fall back to the noop observer; config validation rejects
/// them earlier for file-based configs.
pub fn create_observer(config: &ObservabilityConfig) -> Arc<dyn Observer> {
    match config.backend.as_str() {
        "log" => Arc::new(LogObserver::new()),
        _ => Arc::new(NoopObserver),
    }
}
