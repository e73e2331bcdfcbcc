use super::{FeedbackInput, FeedbackPayload};
use crate::config::FeedbackConfig;
use crate::host::View;
use crate::lifecycle::{CompletionGuard, DeliveryMode, Effect, InstanceMeta, Interaction, TimerKind};
use crate::trace::{InteractionData, InteractionEvent, InteractionName, TraceConfig, TranscriptTurn};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackState {
    Idle,
    /// Rating chosen, comment box revealed.
    Rated,
    Completed,
    /// Terminal without any feedback signal.
    Dismissed,
}

/// Which path reached completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Provenance {
    ExplicitSubmit,
    ExplicitSkip,
    /// Rated, never typed, auto-submit timer fired.
    AutoSubmitRating,
    /// Typed, then went idle for the inactivity delay.
    AutoSubmitInactivity,
    /// Nothing happened before the dismiss timer fired.
    Dismissed,
}

impl Provenance {
    pub fn skipped(self) -> bool {
        matches!(self, Self::ExplicitSkip | Self::Dismissed)
    }

    pub fn auto_submitted(self) -> bool {
        matches!(self, Self::AutoSubmitRating | Self::AutoSubmitInactivity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSettings {
    pub webhook_url: Option<String>,
    pub auto_submit_delay: Duration,
    pub inactivity_delay: Duration,
    pub transcript: Vec<TranscriptTurn>,
}

impl FeedbackSettings {
    /// Trace payload values win over configured ones.
    pub fn resolve(config: &FeedbackConfig, trace: &TraceConfig) -> Self {
        Self {
            webhook_url: trace
                .webhook_url
                .clone()
                .or_else(|| config.webhook_url.clone()),
            auto_submit_delay: trace
                .auto_submit_delay_ms
                .map_or_else(|| config.auto_submit_delay(), Duration::from_millis),
            inactivity_delay: trace
                .inactivity_delay_ms
                .map_or_else(|| config.inactivity_delay(), Duration::from_millis),
            transcript: trace.transcript.clone(),
        }
    }
}

pub struct FeedbackMachine {
    instance: InstanceMeta,
    settings: FeedbackSettings,
    state: FeedbackState,
    rating: Option<u8>,
    comment: String,
    typing_started: bool,
    provenance: Option<Provenance>,
    guard: CompletionGuard,
}

impl FeedbackMachine {
    pub fn new(instance: InstanceMeta, settings: FeedbackSettings) -> Self {
        Self {
            instance,
            settings,
            state: FeedbackState::Idle,
            rating: None,
            comment: String::new(),
            typing_started: false,
            provenance: None,
            guard: CompletionGuard::new(),
        }
    }

    pub fn state(&self) -> FeedbackState {
        self.state
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn provenance(&self) -> Option<Provenance> {
        self.provenance
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, FeedbackState::Completed | FeedbackState::Dismissed)
    }

    fn prompt(&self) -> View {
        View::FeedbackPrompt {
            rating: self.rating,
            comment_open: self.state == FeedbackState::Rated,
        }
    }

    fn rate(&mut self, rating: u8) -> Vec<Effect> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            debug!(instance = %self.instance.id, rating, "rating out of range ignored");
            return Vec::new();
        }
        self.rating = Some(rating);
        self.state = FeedbackState::Rated;

        let mut effects = vec![Effect::CancelTimer(TimerKind::Dismiss), Effect::Render(self.prompt())];
        // Once typing started, silent auto-submit stays off for good.
        if !self.typing_started {
            effects.push(Effect::arm(TimerKind::AutoSubmit, self.settings.auto_submit_delay));
        }
        effects
    }

    fn type_comment(&mut self, text: String) -> Vec<Effect> {
        if self.state != FeedbackState::Rated {
            return Vec::new();
        }
        self.comment = text;

        let mut effects = Vec::new();
        if !self.typing_started && !self.comment.trim().is_empty() {
            self.typing_started = true;
            effects.push(Effect::CancelTimer(TimerKind::AutoSubmit));
        }
        if self.typing_started {
            effects.push(Effect::arm(TimerKind::Inactivity, self.settings.inactivity_delay));
        }
        effects
    }

    fn focus(&self) -> Vec<Effect> {
        if self.state == FeedbackState::Rated && self.typing_started {
            vec![Effect::arm(TimerKind::Inactivity, self.settings.inactivity_delay)]
        } else {
            Vec::new()
        }
    }

    fn has_signal(&self) -> bool {
        self.rating.is_some() || !self.comment.trim().is_empty()
    }

    fn complete(&mut self, provenance: Provenance) -> Vec<Effect> {
        if !self.guard.try_claim() {
            debug!(instance = %self.instance.id, provenance = %provenance, "completion already claimed");
            return Vec::new();
        }
        self.provenance = Some(provenance);

        let mut effects = vec![Effect::CancelAllTimers];
        if provenance.skipped() && !self.has_signal() {
            self.state = FeedbackState::Dismissed;
            effects.push(Effect::FadeOut);
        } else {
            self.state = FeedbackState::Completed;
            let payload = FeedbackPayload::build(
                &self.instance,
                self.rating,
                &self.comment,
                provenance,
                &self.settings.transcript,
            );
            effects.push(Effect::Deliver {
                url: self.settings.webhook_url.clone(),
                payload: payload.to_value(),
                mode: DeliveryMode::FireAndForget,
            });
            effects.push(Effect::Render(View::FeedbackThanks {
                rating: self.rating,
            }));
            effects.push(Effect::Dispatch(InteractionEvent::new(
                InteractionName::Complete,
                InteractionData {
                    action: provenance.to_string(),
                    label: "Feedback received".into(),
                    priority: None,
                },
            )));
        }
        effects.push(Effect::finish(provenance.to_string()));
        effects
    }
}

impl Interaction for FeedbackMachine {
    type Input = FeedbackInput;

    fn start(&mut self) -> Vec<Effect> {
        vec![
            Effect::Render(self.prompt()),
            Effect::arm(TimerKind::Dismiss, self.settings.auto_submit_delay),
        ]
    }

    fn on_input(&mut self, input: FeedbackInput) -> Vec<Effect> {
        if self.is_terminal() {
            return Vec::new();
        }
        match input {
            FeedbackInput::Rate(rating) => self.rate(rating),
            FeedbackInput::Focus => self.focus(),
            FeedbackInput::Type(text) => self.type_comment(text),
            FeedbackInput::Submit => self.complete(Provenance::ExplicitSubmit),
            FeedbackInput::Skip => self.complete(Provenance::ExplicitSkip),
        }
    }

    fn on_timer(&mut self, timer: TimerKind) -> Vec<Effect> {
        match timer {
            TimerKind::Dismiss => self.complete(Provenance::Dismissed),
            TimerKind::AutoSubmit => self.complete(Provenance::AutoSubmitRating),
            TimerKind::Inactivity => self.complete(Provenance::AutoSubmitInactivity),
        }
    }

    fn is_finished(&self) -> bool {
        self.is_terminal()
    }
}
