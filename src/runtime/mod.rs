//! Trace dispatch: registry lookup, render admission, then render.

use crate::config::Config;
use crate::delivery::WebhookSink;
use crate::host::Surface;
use crate::lifecycle::{InstanceMeta, Mounted, RenderContext, Services};
use crate::observability::{Observer, create_observer};
use crate::render::{Admission, CooldownStore, MemoryCooldownStore, RenderGuard};
use crate::trace::{TraceConfig, TraceEvent};
use crate::widgets::WidgetRegistry;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Entry point for an embedding host: one call per inbound trace.
pub struct WidgetRuntime {
    registry: WidgetRegistry,
    guard: RenderGuard,
    services: Services,
    config: Arc<Config>,
}

impl WidgetRuntime {
    /// Runtime with the default widgets and an in-memory cooldown store.
    pub fn new(config: Config, surface: Arc<dyn Surface>, sink: Arc<dyn WebhookSink>) -> Self {
        let observer = create_observer(&config.observability);
        Self::with_parts(
            config,
            WidgetRegistry::with_defaults(),
            Arc::new(MemoryCooldownStore::new()),
            Services::new(surface, sink, observer),
        )
    }

    pub fn with_parts(
        config: Config,
        registry: WidgetRegistry,
        store: Arc<dyn CooldownStore>,
        services: Services,
    ) -> Self {
        let guard = RenderGuard::new(
            store,
            config.render.cooldown(),
            Arc::clone(&services.observer),
        );
        Self {
            registry,
            guard,
            services,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn observer(&self) -> Arc<dyn Observer> {
        Arc::clone(&self.services.observer)
    }

    pub fn active_sessions(&self) -> u64 {
        self.services.active_sessions()
    }

    /// Render the widget for `event`, if any.
    ///
    /// Never fails: unmatched traces, suppressed duplicates and host errors
    /// all yield [`Mounted::nothing`]. Must be called from within a tokio
    /// runtime.
    pub fn handle(&self, event: &TraceEvent) -> Mounted {
        let Some(widget) = self.registry.find(event) else {
            debug!(kind = %event.kind, "no widget for trace");
            return Mounted::nothing();
        };

        let trace = TraceConfig::decode(&event.payload);
        let family = widget.family();

        match self
            .guard
            .admit(family, self.services.surface.as_ref(), Instant::now())
        {
            Admission::Suppressed { since_last } => {
                debug!(
                    family,
                    since_last_ms = u64::try_from(since_last.as_millis()).unwrap_or(u64::MAX),
                    "render suppressed inside cooldown"
                );
                return Mounted::nothing();
            }
            Admission::Proceed { removed_stale } => {
                if let Some(node) = removed_stale {
                    debug!(family, node = %node, "stale instance removed");
                }
            }
        }

        let ctx = RenderContext {
            instance: InstanceMeta::derive(family, &trace),
            trace,
            services: self.services.clone(),
            config: Arc::clone(&self.config),
        };

        match widget.render(&ctx) {
            Ok(mounted) => mounted,
            Err(e) => {
                warn!(family, instance = %ctx.instance.id, error = %e, "widget render failed");
                Mounted::nothing()
            }
        }
    }
}

impl std::fmt::Debug for WidgetRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRuntime")
            .field("widgets", &self.registry.tags())
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}
