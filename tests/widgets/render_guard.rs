use tracewidgets::host::Surface;
use tracewidgets::widgets::feedback::FeedbackInput;

use super::widget_harness::{advance_ms, harness, node, settle, trace};

#[tokio::test(start_paused = true)]
async fn second_render_inside_cooldown_is_suppressed() {
    let h = harness();
    let first = h.runtime.handle(&trace("feedback", "s1", "m1"));
    settle().await;
    assert!(first.is_live());

    advance_ms(1_000).await;
    let second = h.runtime.handle(&trace("feedback", "s1", "m2"));
    settle().await;

    assert!(!second.is_live());
    assert!(second.disposer.is_noop());
    assert_eq!(h.surface.mounted_count("feedback"), 1);
    assert_eq!(h.runtime.active_sessions(), 1);

    // The suppressed render armed nothing: only the first prompt's dismiss
    // timer is pending.
    first.handle.send(FeedbackInput::Rate(3));
    settle().await;
    advance_ms(25_000).await;
    assert_eq!(h.sink.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn render_after_cooldown_replaces_previous_node() {
    let h = harness();
    let first = h.runtime.handle(&trace("feedback", "s1", "m1"));
    settle().await;

    advance_ms(5_000).await;
    let second = h.runtime.handle(&trace("feedback", "s1", "m2"));
    settle().await;

    assert!(second.is_live());
    assert!(!h.surface.is_connected(&node(&first)));
    assert!(h.surface.is_connected(&node(&second)));
    assert_eq!(h.surface.attached_nodes("feedback"), vec![node(&second)]);

    // The evicted instance's session stopped with its node.
    assert!(first.handle.is_closed());
    assert!(!first.handle.send(FeedbackInput::Rate(5)));
    assert_eq!(h.runtime.active_sessions(), 1);
}

#[tokio::test(start_paused = true)]
async fn cooldown_is_per_family() {
    let h = harness();
    let feedback = h.runtime.handle(&trace("feedback", "s1", "m1"));
    let wizard = h.runtime.handle(&trace("lead_wizard", "s1", "m1"));
    settle().await;

    assert!(feedback.is_live());
    assert!(wizard.is_live());
    assert_eq!(wizard.instance_id.as_deref(), Some("lead_wizard-s1-m1"));
}
