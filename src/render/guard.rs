use super::CooldownStore;
use crate::host::{NodeId, Surface};
use crate::observability::{Observer, ObserverEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Outcome of a render admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Render may go ahead; `removed_stale` is the evicted earlier node.
    Proceed { removed_stale: Option<NodeId> },
    /// A render of the same family happened `since_last` ago, inside the
    /// cooldown window. Nothing may be created.
    Suppressed { since_last: Duration },
}

impl Admission {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed { .. })
    }
}

pub struct RenderGuard {
    store: Arc<dyn CooldownStore>,
    window: Duration,
    observer: Arc<dyn Observer>,
}

impl RenderGuard {
    pub fn new(store: Arc<dyn CooldownStore>, window: Duration, observer: Arc<dyn Observer>) -> Self {
        Self {
            store,
            window,
            observer,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decide whether a render of `family` at `now` proceeds.
    ///
    /// Reads and writes the store within one call. On proceed, a still
    /// attached node of the same family is removed before `now` is recorded.
    /// A surface that cannot answer the lookup is treated as having no stale
    /// node.
    pub fn admit(&self, family: &str, surface: &dyn Surface, now: Instant) -> Admission {
        if let Some(last) = self.store.last_render(family) {
            let since_last = now.saturating_duration_since(last);
            if since_last < self.window {
                self.observer.record_event(&ObserverEvent::RenderSuppressed {
                    family: family.to_string(),
                    since_last,
                });
                return Admission::Suppressed { since_last };
            }
        }

        let removed_stale = match surface.find_attached(family) {
            Ok(Some(node)) => {
                surface.remove(&node);
                self.observer.record_event(&ObserverEvent::StaleInstanceRemoved {
                    family: family.to_string(),
                    node: node.to_string(),
                });
                Some(node)
            }
            Ok(None) => None,
            Err(e) => {
                debug!(family = %family, error = %e, "stale instance lookup skipped");
                None
            }
        };

        self.store.record(family, now);
        Admission::Proceed { removed_stale }
    }
}

impl std::fmt::Debug for RenderGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderGuard")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
