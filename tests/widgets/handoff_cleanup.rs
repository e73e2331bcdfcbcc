use tracewidgets::host::{MemorySurface, View};
use tracewidgets::trace::InteractionName;
use tracewidgets::widgets::handoff::HandoffInput;

use super::widget_harness::{config, current_view, harness, harness_with, node, settle, trace};

#[tokio::test(start_paused = true)]
async fn detach_before_interaction_reenables_input_once() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("force_handoff", "s1", "m1"));
    settle().await;
    assert!(!h.surface.input_enabled());

    h.surface.detach(&node(&mounted));
    settle().await;
    h.surface.detach(&node(&mounted));
    settle().await;
    mounted.disposer.dispose();
    settle().await;

    assert!(h.surface.input_enabled());
    assert_eq!(h.surface.input_toggles(), vec![false, true]);
    assert!(h.surface.dispatched().is_empty());
    assert_eq!(h.runtime.active_sessions(), 0);
}

#[tokio::test(start_paused = true)]
async fn continue_releases_input_and_navigates_once() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("force_handoff", "s1", "m2"));
    settle().await;

    mounted.handle.send(HandoffInput::Continue);
    mounted.handle.send(HandoffInput::Continue);
    settle().await;

    assert_eq!(current_view(&h.surface, &mounted), View::HandoffReleased);
    let dispatched = h.surface.dispatched();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].name(), InteractionName::Navigate);

    // Later teardown must not toggle the input again.
    h.surface.detach(&node(&mounted));
    mounted.disposer.dispose();
    settle().await;
    assert_eq!(h.surface.input_toggles(), vec![false, true]);
}

#[tokio::test(start_paused = true)]
async fn dispose_reenables_input() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("force_handoff", "s1", "m3"));
    settle().await;

    mounted.disposer.dispose();
    settle().await;
    assert!(h.surface.input_enabled());
    assert!(mounted.handle.is_closed());
}

#[tokio::test(start_paused = true)]
async fn host_without_input_container_still_renders() {
    let h = harness_with(config(), MemorySurface::without_input());
    let mounted = h.runtime.handle(&trace("force_handoff", "s1", "m4"));
    settle().await;

    assert!(matches!(
        current_view(&h.surface, &mounted),
        View::HandoffNotice { .. }
    ));
    h.surface.detach(&node(&mounted));
    settle().await;
    assert!(h.surface.input_toggles().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unmounted_host_gives_input_back_and_renders_nothing() {
    let h = harness_with(config(), MemorySurface::unmounted());
    let mounted = h.runtime.handle(&trace("force_handoff", "s1", "m5"));
    settle().await;

    assert!(!mounted.is_live());
    mounted.disposer.dispose();
    assert_eq!(h.surface.input_toggles(), vec![false, true]);
}
