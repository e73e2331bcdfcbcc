//! Forced handoff notice.
//!
//! Disables the host chat input while the notice is up. The input comes back
//! exactly once: when the user continues, when the host disposes the widget,
//! or when the node is detached, whichever happens first.

use super::{Widget, WidgetInput};
use crate::error::WidgetError;
use crate::host::{InputLock, View};
use crate::lifecycle::{
    CompletionGuard, Effect, InstanceMeta, Interaction, Mounted, RenderContext, launch,
};
use crate::trace::{InteractionData, InteractionEvent, InteractionName};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const TAG: &str = "force_handoff";

pub const DEFAULT_MESSAGE: &str = "A member of our team will take it from here.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffInput {
    Continue,
}

impl From<HandoffInput> for WidgetInput {
    fn from(input: HandoffInput) -> Self {
        Self::Handoff(input)
    }
}

impl TryFrom<WidgetInput> for HandoffInput {
    type Error = WidgetInput;

    fn try_from(input: WidgetInput) -> Result<Self, Self::Error> {
        match input {
            WidgetInput::Handoff(input) => Ok(input),
            other => Err(other),
        }
    }
}

pub struct HandoffMachine {
    instance: InstanceMeta,
    message: String,
    released: CompletionGuard,
}

impl HandoffMachine {
    pub fn new(instance: InstanceMeta, message: Option<String>) -> Self {
        Self {
            instance,
            message: message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            released: CompletionGuard::new(),
        }
    }

    pub fn instance(&self) -> &InstanceMeta {
        &self.instance
    }
}

impl Interaction for HandoffMachine {
    type Input = HandoffInput;

    fn start(&mut self) -> Vec<Effect> {
        vec![Effect::Render(View::HandoffNotice {
            message: self.message.clone(),
        })]
    }

    fn on_input(&mut self, input: HandoffInput) -> Vec<Effect> {
        match input {
            HandoffInput::Continue => {
                if !self.released.try_claim() {
                    return Vec::new();
                }
                let event = InteractionEvent::new(
                    InteractionName::Navigate,
                    InteractionData {
                        action: "handoff_continue".into(),
                        label: "Continue".into(),
                        priority: None,
                    },
                );
                vec![
                    Effect::ReleaseInput,
                    Effect::Dispatch(event),
                    Effect::Render(View::HandoffReleased),
                    Effect::finish("handoff_continue"),
                ]
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.released.is_claimed()
    }
}

pub struct HandoffWidget;

impl Widget for HandoffWidget {
    fn tag(&self) -> &str {
        TAG
    }

    fn render(&self, ctx: &RenderContext) -> Result<Mounted, WidgetError> {
        let lock: Arc<InputLock> = InputLock::acquire(Arc::clone(&ctx.services.surface));
        let machine = HandoffMachine::new(ctx.instance.clone(), ctx.trace.handoff_message.clone());
        launch(machine, ctx, Some(lock))
    }
}
