use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tracewidgets::DeliveryError;
use tracewidgets::config::DeliveryConfig;
use tracewidgets::delivery::{HttpWebhook, WebhookSink};
use tracewidgets::host::View;
use tracewidgets::widgets::feedback::FeedbackInput;
use tracewidgets::widgets::wizard::{Intent, TextField, WizardInput};

use super::widget_harness::{config, eventually, runtime_with_sink, trace};

fn webhook() -> Arc<HttpWebhook> {
    Arc::new(HttpWebhook::from_config(&DeliveryConfig::default()))
}

#[tokio::test]
async fn posts_json_and_accepts_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({"widget": "feedback"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = webhook()
        .deliver(&format!("{}/hook", server.uri()), &json!({"widget": "feedback"}))
        .await;
    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn non_2xx_is_a_status_error_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/hook", server.uri());
    let err = webhook().deliver(&url, &json!({})).await.unwrap_err();
    assert_eq!(err, DeliveryError::Status { url, status: 502 });
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Port 9 (discard) is closed on test hosts.
    let err = webhook()
        .deliver("http://127.0.0.1:9/hook", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Transport { .. }));
}

#[tokio::test]
async fn feedback_submit_reaches_the_webhook_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedback"))
        .and(body_partial_json(json!({
            "rating": 5,
            "provenance": "explicit_submit",
            "instanceId": "feedback-s1-m1"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config();
    config.feedback.webhook_url = Some(format!("{}/feedback", server.uri()));
    let (surface, runtime) = runtime_with_sink(config, webhook());

    let mounted = runtime.handle(&trace("feedback", "s1", "m1"));
    mounted.handle.send(FeedbackInput::Rate(5));
    mounted.handle.send(FeedbackInput::Submit);
    mounted.handle.send(FeedbackInput::Submit);

    let node = mounted.node.clone().unwrap();
    assert!(eventually(|| surface.view_of(&node) == Some(View::FeedbackThanks { rating: Some(5) })).await);
    for _ in 0..200 {
        if server
            .received_requests()
            .await
            .is_some_and(|requests| !requests.is_empty())
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    server.verify().await;
}

#[tokio::test]
async fn wizard_server_error_shows_retry_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let mut config = config();
    config.wizard.webhook_url = Some(format!("{}/leads", server.uri()));
    let (surface, runtime) = runtime_with_sink(config, webhook());

    let mounted = runtime.handle(&trace("lead_wizard", "s1", "m1"));
    let handle = &mounted.handle;
    for (field, value) in [
        (TextField::FirstName, "Jonas"),
        (TextField::LastName, "Berg"),
        (TextField::Email, "jonas@example.se"),
    ] {
        handle.send(WizardInput::SetField {
            field,
            value: value.into(),
        });
    }
    handle.send(WizardInput::SelectCountry {
        code: "SE".into(),
        name: "Sweden".into(),
    });
    handle.send(WizardInput::SelectIntent(Intent::Planning));
    handle.send(WizardInput::Next);
    handle.send(WizardInput::SetConsent(true));
    handle.send(WizardInput::Submit);

    let node = mounted.node.clone().unwrap();
    assert!(
        eventually(|| matches!(
            surface.view_of(&node),
            Some(View::WizardStep { step: 2, error: Some(_), .. })
        ))
        .await
    );

    handle.send(WizardInput::Submit);
    assert!(
        eventually(|| matches!(surface.view_of(&node), Some(View::WizardSuccess { .. }))).await
    );
    assert_eq!(server.received_requests().await.map(|r| r.len()), Some(2));
}
