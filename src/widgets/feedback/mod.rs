//! Single-step rating prompt with an optional comment.
//!
//! Three timers race towards the same completion: `Dismiss` (armed at
//! render), `AutoSubmit` (armed once rated) and `Inactivity` (debounce while
//! typing). The first one to fire, or an explicit submit or skip, wins.

mod machine;
mod payload;

pub use machine::{FeedbackMachine, FeedbackSettings, FeedbackState, Provenance};
pub use payload::FeedbackPayload;

use super::{Widget, WidgetInput};
use crate::error::WidgetError;
use crate::lifecycle::{Mounted, RenderContext, launch};
use serde::{Deserialize, Serialize};

pub const TAG: &str = "feedback";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackInput {
    /// Pick a 1–5 rating.
    Rate(u8),
    /// The comment box gained focus.
    Focus,
    /// Full comment text after a keystroke.
    Type(String),
    Submit,
    Skip,
}

impl From<FeedbackInput> for WidgetInput {
    fn from(input: FeedbackInput) -> Self {
        Self::Feedback(input)
    }
}

impl TryFrom<WidgetInput> for FeedbackInput {
    type Error = WidgetInput;

    fn try_from(input: WidgetInput) -> Result<Self, Self::Error> {
        match input {
            WidgetInput::Feedback(input) => Ok(input),
            other => Err(other),
        }
    }
}

pub struct FeedbackWidget;

impl Widget for FeedbackWidget {
    fn tag(&self) -> &str {
        TAG
    }

    fn render(&self, ctx: &RenderContext) -> Result<Mounted, WidgetError> {
        let settings = FeedbackSettings::resolve(&ctx.config.feedback, &ctx.trace);
        let machine = FeedbackMachine::new(ctx.instance.clone(), settings);
        launch(machine, ctx, None)
    }
}
