#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use tracewidgets::config::Config;
use tracewidgets::delivery::{MemorySink, WebhookSink};
use tracewidgets::host::{MemorySurface, NodeId, View};
use tracewidgets::{Mounted, TraceEvent, WidgetRuntime};

pub const FEEDBACK_HOOK: &str = "https://hooks.example/feedback";
pub const LEAD_HOOK: &str = "https://hooks.example/leads";

pub struct Harness {
    pub surface: Arc<MemorySurface>,
    pub sink: Arc<MemorySink>,
    pub runtime: WidgetRuntime,
}

pub fn config() -> Config {
    let mut config = Config::default();
    config.feedback.webhook_url = Some(FEEDBACK_HOOK.into());
    config.wizard.webhook_url = Some(LEAD_HOOK.into());
    config.observability.backend = "none".into();
    config
}

pub fn harness() -> Harness {
    harness_with(config(), MemorySurface::new())
}

pub fn harness_with(config: Config, surface: MemorySurface) -> Harness {
    let surface = Arc::new(surface);
    let sink = Arc::new(MemorySink::new());
    let runtime = WidgetRuntime::new(config, surface.clone(), sink.clone());
    Harness {
        surface,
        sink,
        runtime,
    }
}

/// Runtime over an arbitrary sink, for HTTP-backed tests.
pub fn runtime_with_sink(config: Config, sink: Arc<dyn WebhookSink>) -> (Arc<MemorySurface>, WidgetRuntime) {
    let surface = Arc::new(MemorySurface::new());
    let runtime = WidgetRuntime::new(config, surface.clone(), sink);
    (surface, runtime)
}

pub fn trace(kind: &str, session: &str, message: &str) -> TraceEvent {
    TraceEvent::new(kind, json!({ "sessionId": session, "messageId": message }))
}

/// Let every ready task run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Advance paused time by `ms`, then let woken tasks run.
pub async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    settle().await;
}

pub fn node(mounted: &Mounted) -> NodeId {
    mounted.node.clone().expect("widget should be mounted")
}

pub fn current_view(harness_surface: &MemorySurface, mounted: &Mounted) -> View {
    harness_surface
        .view_of(&node(mounted))
        .expect("node should exist")
}

/// Poll `check` in real time until it holds or two seconds pass.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
