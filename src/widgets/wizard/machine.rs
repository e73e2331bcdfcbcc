use super::{
    CountryDirectory, Experience, Field, Intent, LeadFields, LeadPayload, Priority, TextField,
    WizardInput, classify, validate_step,
};
use crate::config::WizardConfig;
use crate::error::DeliveryError;
use crate::host::View;
use crate::lifecycle::{
    CompletionGuard, DeliveryMode, Effect, InstanceMeta, Interaction, SubmissionGuard,
};
use crate::trace::{InteractionData, InteractionEvent, InteractionName, TraceConfig};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub const STEP_COUNT: u8 = 2;

pub const RETRY_MESSAGE: &str = "We couldn't send your details. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Editable form step, 1-based.
    Form(u8),
    Submitting,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardSettings {
    pub webhook_url: Option<String>,
}

impl WizardSettings {
    pub fn resolve(config: &WizardConfig, trace: &TraceConfig) -> Self {
        Self {
            webhook_url: trace
                .webhook_url
                .clone()
                .or_else(|| config.webhook_url.clone()),
        }
    }
}

pub struct WizardMachine {
    instance: InstanceMeta,
    settings: WizardSettings,
    directory: CountryDirectory,
    step: WizardStep,
    fields: LeadFields,
    invalid: BTreeSet<Field>,
    suggestions: Vec<super::Country>,
    error: Option<String>,
    attempts: u32,
    submission: SubmissionGuard,
    completed: CompletionGuard,
}

impl WizardMachine {
    pub fn new(instance: InstanceMeta, settings: WizardSettings) -> Self {
        Self::with_directory(instance, settings, CountryDirectory::default())
    }

    pub fn with_directory(
        instance: InstanceMeta,
        settings: WizardSettings,
        directory: CountryDirectory,
    ) -> Self {
        Self {
            instance,
            settings,
            directory,
            step: WizardStep::Form(1),
            fields: LeadFields::default(),
            invalid: BTreeSet::new(),
            suggestions: Vec::new(),
            error: None,
            attempts: 0,
            submission: SubmissionGuard::default(),
            completed: CompletionGuard::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn fields(&self) -> &LeadFields {
        &self.fields
    }

    pub fn invalid(&self) -> &BTreeSet<Field> {
        &self.invalid
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }

    pub fn priority(&self) -> Priority {
        classify(self.fields.intent, self.fields.experience)
    }

    fn form_view(&self, step: u8) -> View {
        View::WizardStep {
            step,
            total: STEP_COUNT,
            fields: self.fields.clone(),
            invalid: self.invalid.iter().copied().collect(),
            suggestions: self.suggestions.clone(),
            error: self.error.clone(),
        }
    }

    fn render_form(&self) -> Vec<Effect> {
        match self.step {
            WizardStep::Form(step) => vec![Effect::Render(self.form_view(step))],
            _ => Vec::new(),
        }
    }

    fn set_text(&mut self, field: TextField, value: String) -> Vec<Effect> {
        let cleared = field
            .gated()
            .is_some_and(|gated| self.invalid.remove(&gated));
        let country = field == TextField::Country;
        if country {
            self.suggestions = self.directory.search(&value);
        }
        self.fields.set_text(field, value);
        if cleared || country {
            self.render_form()
        } else {
            Vec::new()
        }
    }

    fn select_country(&mut self, code: String, name: String) -> Vec<Effect> {
        let name = if name.trim().is_empty() {
            self.directory
                .find(&code)
                .map(|c| c.name.clone())
                .unwrap_or_default()
        } else {
            name
        };
        self.fields.country = name;
        self.fields.country_code = (!code.trim().is_empty()).then(|| code.trim().to_uppercase());
        self.suggestions.clear();
        self.invalid.remove(&Field::Country);
        self.render_form()
    }

    fn select_intent(&mut self, intent: Intent) -> Vec<Effect> {
        self.fields.intent = Some(intent);
        self.invalid.remove(&Field::Intent);
        self.render_form()
    }

    fn select_experience(&mut self, experience: Experience) -> Vec<Effect> {
        self.fields.experience = Some(experience);
        self.render_form()
    }

    fn set_consent(&mut self, consent: bool) -> Vec<Effect> {
        self.fields.consent = consent;
        if consent {
            self.invalid.remove(&Field::Consent);
        }
        self.render_form()
    }

    /// Run the gate for `step`; on failure mark the offending fields.
    fn gate(&mut self, step: u8) -> bool {
        let invalid = validate_step(step, &self.fields);
        let open = invalid.is_empty();
        if !open {
            debug!(instance = %self.instance.id, step, ?invalid, "validation gate closed");
        }
        self.invalid = invalid;
        open
    }

    fn next(&mut self) -> Vec<Effect> {
        let WizardStep::Form(step) = self.step else {
            return Vec::new();
        };
        if !self.gate(step) {
            return self.render_form();
        }
        if step >= STEP_COUNT {
            return self.submit();
        }
        self.step = WizardStep::Form(step + 1);
        self.error = None;
        self.suggestions.clear();
        self.render_form()
    }

    fn back(&mut self) -> Vec<Effect> {
        match self.step {
            WizardStep::Form(step) if step > 1 => {
                self.step = WizardStep::Form(step - 1);
                self.invalid.clear();
                self.error = None;
                self.render_form()
            }
            _ => Vec::new(),
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        match self.step {
            WizardStep::Form(step) if step < STEP_COUNT => return self.next(),
            WizardStep::Form(_) => {}
            _ => return Vec::new(),
        }
        if !self.gate(STEP_COUNT) {
            return self.render_form();
        }
        if !self.submission.try_enter() {
            debug!(instance = %self.instance.id, "submission already in flight");
            return Vec::new();
        }
        self.step = WizardStep::Submitting;
        self.error = None;
        self.attempts += 1;

        let payload = LeadPayload::build(&self.instance, &self.fields, self.attempts);
        vec![
            Effect::Render(View::WizardLoading),
            Effect::Deliver {
                url: self.settings.webhook_url.clone(),
                payload: payload.to_value(),
                mode: DeliveryMode::Awaited,
            },
        ]
    }

    fn label(&self) -> String {
        let name = format!("{} {}", self.fields.first_name.trim(), self.fields.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            "Lead captured".to_string()
        } else {
            format!("Lead captured: {name}")
        }
    }
}

impl Interaction for WizardMachine {
    type Input = WizardInput;

    fn start(&mut self) -> Vec<Effect> {
        self.render_form()
    }

    fn on_input(&mut self, input: WizardInput) -> Vec<Effect> {
        // The form is gone once submission starts.
        if !matches!(self.step, WizardStep::Form(_)) {
            debug!(instance = %self.instance.id, ?input, "input ignored outside form steps");
            return Vec::new();
        }
        match input {
            WizardInput::SetField { field, value } => self.set_text(field, value),
            WizardInput::SelectCountry { code, name } => self.select_country(code, name),
            WizardInput::SelectIntent(intent) => self.select_intent(intent),
            WizardInput::SelectExperience(experience) => self.select_experience(experience),
            WizardInput::SetConsent(consent) => self.set_consent(consent),
            WizardInput::Next => self.next(),
            WizardInput::Back => self.back(),
            WizardInput::Submit => self.submit(),
        }
    }

    fn on_delivery(&mut self, result: Result<(), DeliveryError>) -> Vec<Effect> {
        if self.step != WizardStep::Submitting {
            return Vec::new();
        }
        match result {
            Ok(()) => {
                if !self.completed.try_claim() {
                    return Vec::new();
                }
                self.step = WizardStep::Success;
                let priority = self.priority();
                let event = InteractionEvent::new(
                    InteractionName::LeadCaptured,
                    InteractionData {
                        action: "lead_submitted".into(),
                        label: self.label(),
                        priority: Some(priority),
                    },
                );
                vec![
                    Effect::Dispatch(event),
                    Effect::Render(View::WizardSuccess { priority }),
                    Effect::finish("lead_submitted"),
                ]
            }
            Err(e) => {
                warn!(instance = %self.instance.id, attempt = self.attempts, error = %e, "lead delivery failed");
                self.submission.release();
                self.step = WizardStep::Form(STEP_COUNT);
                self.error = Some(RETRY_MESSAGE.to_string());
                self.render_form()
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.step == WizardStep::Success
    }
}
