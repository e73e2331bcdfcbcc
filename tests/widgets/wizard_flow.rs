use tracewidgets::host::View;
use tracewidgets::trace::InteractionName;
use tracewidgets::WidgetHandle;
use tracewidgets::widgets::wizard::{
    Experience, Field, Intent, Priority, RETRY_MESSAGE, TextField, WizardInput,
};

use super::widget_harness::{LEAD_HOOK, current_view, harness, settle, trace};

fn fill_step_one(handle: &WidgetHandle, intent: Intent, experience: Option<Experience>) {
    for (field, value) in [
        (TextField::FirstName, "Amina"),
        (TextField::LastName, "Odhiambo"),
        (TextField::Email, "amina@example.co.ke"),
        (TextField::Country, "ken"),
    ] {
        handle.send(WizardInput::SetField {
            field,
            value: value.into(),
        });
    }
    handle.send(WizardInput::SelectCountry {
        code: "KE".into(),
        name: "Kenya".into(),
    });
    handle.send(WizardInput::SelectIntent(intent));
    if let Some(experience) = experience {
        handle.send(WizardInput::SelectExperience(experience));
    }
}

#[tokio::test(start_paused = true)]
async fn happy_path_captures_a_hot_lead() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("lead_wizard", "s1", "m1"));
    settle().await;

    fill_step_one(&mounted.handle, Intent::ReadyToBook, Some(Experience::Novice));
    mounted.handle.send(WizardInput::Next);
    mounted.handle.send(WizardInput::SetConsent(true));
    mounted.handle.send(WizardInput::Submit);
    settle().await;

    assert_eq!(h.sink.count(), 1);
    let delivery = &h.sink.deliveries()[0];
    assert_eq!(delivery.url, LEAD_HOOK);
    assert_eq!(delivery.payload["priority"], "hot");
    assert_eq!(delivery.payload["intentScore"], 4);
    assert_eq!(delivery.payload["experienceScore"], 1);

    assert_eq!(
        current_view(&h.surface, &mounted),
        View::WizardSuccess {
            priority: Priority::Hot
        }
    );
    let dispatched = h.surface.dispatched();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].name(), InteractionName::LeadCaptured);
    assert_eq!(dispatched[0].payload.data.priority, Some(Priority::Hot));
}

#[tokio::test(start_paused = true)]
async fn missing_country_pick_blocks_step_one() {
    let h = harness();
    let mounted = h.runtime.handle(&trace("lead_wizard", "s1", "m2"));
    settle().await;

    fill_step_one(&mounted.handle, Intent::Planning, None);
    // Typing again after the pick clears the hidden code.
    mounted.handle.send(WizardInput::SetField {
        field: TextField::Country,
        value: "Kenya!".into(),
    });
    mounted.handle.send(WizardInput::Next);
    settle().await;

    match current_view(&h.surface, &mounted) {
        View::WizardStep {
            step,
            invalid,
            fields,
            ..
        } => {
            assert_eq!(step, 1);
            assert_eq!(invalid, vec![Field::Country]);
            assert_eq!(fields.email, "amina@example.co.ke");
            assert_eq!(fields.country, "Kenya!");
        }
        other => panic!("unexpected view: {other:?}"),
    }
    assert_eq!(h.sink.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn webhook_failure_returns_to_step_two_and_allows_retry() {
    let h = harness();
    h.sink.fail_next(1);
    let mounted = h.runtime.handle(&trace("lead_wizard", "s1", "m3"));
    settle().await;

    fill_step_one(&mounted.handle, Intent::Comparing, Some(Experience::Seasoned));
    mounted.handle.send(WizardInput::Next);
    mounted.handle.send(WizardInput::SetField {
        field: TextField::Message,
        value: "Two travellers in June".into(),
    });
    mounted.handle.send(WizardInput::SetConsent(true));
    mounted.handle.send(WizardInput::Submit);
    settle().await;

    assert_eq!(h.sink.count(), 1);
    match current_view(&h.surface, &mounted) {
        View::WizardStep {
            step,
            error,
            fields,
            ..
        } => {
            assert_eq!(step, 2);
            assert_eq!(error.as_deref(), Some(RETRY_MESSAGE));
            assert_eq!(fields.first_name, "Amina");
            assert_eq!(fields.message, "Two travellers in June");
            assert!(fields.consent);
        }
        other => panic!("unexpected view: {other:?}"),
    }
    assert!(h.surface.dispatched().is_empty());

    mounted.handle.send(WizardInput::Submit);
    settle().await;
    assert_eq!(h.sink.count(), 2);
    assert_eq!(h.sink.deliveries()[1].payload["attempt"], 2);
    assert_eq!(
        current_view(&h.surface, &mounted),
        View::WizardSuccess {
            priority: Priority::Warm
        }
    );
}

#[tokio::test(start_paused = true)]
async fn missing_webhook_url_is_a_wizard_failure() {
    let mut config = super::widget_harness::config();
    config.wizard.webhook_url = None;
    let h = super::widget_harness::harness_with(config, tracewidgets::host::MemorySurface::new());
    let mounted = h.runtime.handle(&trace("lead_wizard", "s1", "m4"));
    settle().await;

    fill_step_one(&mounted.handle, Intent::Learning, None);
    mounted.handle.send(WizardInput::Next);
    mounted.handle.send(WizardInput::SetConsent(true));
    mounted.handle.send(WizardInput::Submit);
    settle().await;

    assert_eq!(h.sink.count(), 0);
    assert!(matches!(
        current_view(&h.surface, &mounted),
        View::WizardStep { step: 2, error: Some(_), .. }
    ));
}
