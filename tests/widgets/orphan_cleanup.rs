use std::sync::Arc;

use tracewidgets::WidgetRuntime;
use tracewidgets::delivery::MemorySink;
use tracewidgets::error::HostError;
use tracewidgets::host::{DetachSignal, MemorySurface, NodeId, Surface, View};
use tracewidgets::trace::InteractionEvent;
use tracewidgets::widgets::feedback::FeedbackInput;
use tracewidgets::widgets::handoff::HandoffInput;

use super::widget_harness::{advance_ms, config, node, settle, trace};

/// Memory surface for a host that cannot observe node removal.
struct UnobservedSurface(MemorySurface);

impl Surface for UnobservedSurface {
    fn mount(&self, family: &str, instance_id: &str) -> Result<NodeId, HostError> {
        self.0.mount(family, instance_id)
    }

    fn render(&self, node: &NodeId, view: &View) -> Result<(), HostError> {
        self.0.render(node, view)
    }

    fn find_attached(&self, family: &str) -> Result<Option<NodeId>, HostError> {
        self.0.find_attached(family)
    }

    fn remove(&self, node: &NodeId) {
        self.0.remove(node);
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.0.is_connected(node)
    }

    fn watch_detach(&self, _node: &NodeId) -> DetachSignal {
        DetachSignal::never()
    }

    fn set_input_enabled(&self, enabled: bool) -> Result<(), HostError> {
        self.0.set_input_enabled(enabled)
    }

    fn dispatch(&self, event: &InteractionEvent) -> Result<(), HostError> {
        self.0.dispatch(event)
    }

    fn name(&self) -> &str {
        "unobserved"
    }
}

fn unobserved() -> (Arc<UnobservedSurface>, Arc<MemorySink>, WidgetRuntime) {
    let surface = Arc::new(UnobservedSurface(MemorySurface::new()));
    let sink = Arc::new(MemorySink::new());
    let runtime = WidgetRuntime::new(config(), surface.clone(), sink.clone());
    (surface, sink, runtime)
}

#[tokio::test(start_paused = true)]
async fn evicted_feedback_never_auto_submits_without_detach_signal() {
    let (surface, sink, runtime) = unobserved();
    let first = runtime.handle(&trace("feedback", "s", "m1"));
    settle().await;
    first.handle.send(FeedbackInput::Rate(4));
    settle().await;

    advance_ms(5_000).await;
    let second = runtime.handle(&trace("feedback", "s", "m2"));
    settle().await;
    assert!(second.is_live());
    assert!(!surface.is_connected(&node(&first)));

    // The first rating's auto-submit deadline passes here.
    advance_ms(16_000).await;
    assert_eq!(sink.count(), 0);
    assert!(first.handle.is_closed());
    assert_eq!(runtime.active_sessions(), 1);

    // The live instance still runs its own course.
    second.handle.send(FeedbackInput::Rate(2));
    second.handle.send(FeedbackInput::Submit);
    settle().await;
    let deliveries = sink.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].payload["messageId"], "m2");
}

#[tokio::test(start_paused = true)]
async fn removed_handoff_releases_input_on_next_wake() {
    let (surface, _sink, runtime) = unobserved();
    let mounted = runtime.handle(&trace("force_handoff", "s", "m1"));
    settle().await;
    assert!(!surface.0.input_enabled());

    surface.remove(&node(&mounted));
    settle().await;
    mounted.handle.send(HandoffInput::Continue);
    settle().await;

    assert!(surface.0.input_enabled());
    assert_eq!(surface.0.input_toggles(), vec![false, true]);
    assert!(surface.0.dispatched().is_empty());
    assert_eq!(runtime.active_sessions(), 0);
}
