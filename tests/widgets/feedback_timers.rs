use tracewidgets::host::{Surface, View};
use tracewidgets::trace::InteractionName;
use tracewidgets::widgets::feedback::FeedbackInput;

use super::widget_harness::{
    FEEDBACK_HOOK, advance_ms, current_view, harness, node, settle, trace,
};

#[tokio::test(start_paused = true)]
async fn rating_then_silence_auto_submits_exactly_once() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("feedback", "s1", "m1"));
    settle().await;

    assert!(mounted.handle.send(FeedbackInput::Rate(4)));
    settle().await;

    advance_ms(20_001).await;
    assert_eq!(h.sink.count(), 1);
    let delivery = &h.sink.deliveries()[0];
    assert_eq!(delivery.url, FEEDBACK_HOOK);
    assert_eq!(delivery.payload["provenance"], "auto_submit_rating");
    assert_eq!(delivery.payload["autoSubmitted"], true);
    assert_eq!(delivery.payload["rating"], 4);
    assert_eq!(
        current_view(&h.surface, &mounted),
        View::FeedbackThanks { rating: Some(4) }
    );
    let dispatched = h.surface.dispatched();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].name(), InteractionName::Complete);

    // Every other trigger is dead now.
    advance_ms(60_000).await;
    mounted.handle.send(FeedbackInput::Submit);
    mounted.handle.send(FeedbackInput::Skip);
    settle().await;
    assert_eq!(h.sink.count(), 1);
    assert_eq!(h.runtime.active_sessions(), 0);
}

#[tokio::test(start_paused = true)]
async fn typing_swaps_auto_submit_for_inactivity() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("feedback", "s1", "m2"));
    settle().await;

    mounted.handle.send(FeedbackInput::Rate(5));
    settle().await;
    advance_ms(5_000).await;
    mounted.handle.send(FeedbackInput::Focus);
    mounted.handle.send(FeedbackInput::Type("T".into()));
    settle().await;

    advance_ms(14_000).await;
    assert_eq!(h.sink.count(), 0);

    // Keep typing: each keystroke pushes the inactivity deadline out. The
    // rating auto-submit would have fired at 20s.
    mounted.handle.send(FeedbackInput::Type("The guide was great".into()));
    settle().await;
    advance_ms(14_000).await;
    assert_eq!(h.sink.count(), 0);

    advance_ms(1_500).await;
    assert_eq!(h.sink.count(), 1);
    let payload = &h.sink.deliveries()[0].payload;
    assert_eq!(payload["provenance"], "auto_submit_inactivity");
    assert_eq!(payload["comment"], "The guide was great");
}

#[tokio::test(start_paused = true)]
async fn untouched_prompt_fades_out_without_posting() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("feedback", "s1", "m3"));
    settle().await;

    advance_ms(20_001).await;
    assert_eq!(h.sink.count(), 0);
    assert!(!h.surface.is_connected(&node(&mounted)));
}

#[tokio::test(start_paused = true)]
async fn explicit_submit_beats_pending_timers() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("feedback", "s1", "m4"));
    settle().await;

    mounted.handle.send(FeedbackInput::Rate(2));
    mounted.handle.send(FeedbackInput::Submit);
    settle().await;
    assert_eq!(h.sink.count(), 1);
    assert_eq!(h.sink.deliveries()[0].payload["provenance"], "explicit_submit");

    advance_ms(120_000).await;
    assert_eq!(h.sink.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn trace_payload_overrides_delays() {
    let h = harness();
    let event = tracewidgets::TraceEvent::new(
        "feedback",
        serde_json::json!({
            "sessionId": "s1",
            "messageId": "m5",
            "autoSubmitDelay": "2000",
            "webhookUrl": "https://hooks.example/override"
        }),
    );
    let mounted = h.runtime.handle(&event);
    settle().await;
    mounted.handle.send(FeedbackInput::Rate(3));
    settle().await;

    advance_ms(2_001).await;
    assert_eq!(h.sink.count(), 1);
    assert_eq!(h.sink.deliveries()[0].url, "https://hooks.example/override");
}

#[tokio::test(start_paused = true)]
async fn failed_feedback_delivery_still_thanks_the_user() {
    let h = harness();
    h.sink.fail_next(1);
    let mounted = h.runtime.handle(&trace("feedback", "s1", "m6"));
    settle().await;

    mounted.handle.send(FeedbackInput::Rate(1));
    mounted.handle.send(FeedbackInput::Submit);
    settle().await;

    assert_eq!(h.sink.count(), 1);
    assert_eq!(
        current_view(&h.surface, &mounted),
        View::FeedbackThanks { rating: Some(1) }
    );
}
