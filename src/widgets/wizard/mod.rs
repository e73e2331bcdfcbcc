//! Two-step lead capture form.
//!
//! Step 1 collects contact details and intent, step 2 asks for consent.
//! Navigation is user driven; the only asynchronous edge is the webhook
//! outcome, which either finishes the wizard or drops it back onto step 2
//! with a retry prompt.

mod countries;
mod fields;
mod machine;
mod payload;
mod priority;
mod validation;

pub use countries::{Country, CountryDirectory};
pub use fields::{Field, LeadFields, TextField};
pub use machine::{RETRY_MESSAGE, STEP_COUNT, WizardMachine, WizardSettings, WizardStep};
pub use payload::LeadPayload;
pub use priority::{Experience, Intent, Priority, classify};
pub use validation::{is_valid_email, validate_step};

use super::{Widget, WidgetInput};
use crate::error::WidgetError;
use crate::lifecycle::{Mounted, RenderContext, launch};
use serde::{Deserialize, Serialize};

pub const TAG: &str = "lead_wizard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardInput {
    SetField { field: TextField, value: String },
    /// Pick a suggestion; fills both the visible and the hidden country field.
    SelectCountry { code: String, name: String },
    SelectIntent(Intent),
    SelectExperience(Experience),
    SetConsent(bool),
    Next,
    Back,
    Submit,
}

impl From<WizardInput> for WidgetInput {
    fn from(input: WizardInput) -> Self {
        Self::Wizard(input)
    }
}

impl TryFrom<WidgetInput> for WizardInput {
    type Error = WidgetInput;

    fn try_from(input: WidgetInput) -> Result<Self, Self::Error> {
        match input {
            WidgetInput::Wizard(input) => Ok(input),
            other => Err(other),
        }
    }
}

pub struct LeadWizardWidget;

impl Widget for LeadWizardWidget {
    fn tag(&self) -> &str {
        TAG
    }

    fn render(&self, ctx: &RenderContext) -> Result<Mounted, WidgetError> {
        let settings = WizardSettings::resolve(&ctx.config.wizard, &ctx.trace);
        let machine = WizardMachine::new(ctx.instance.clone(), settings);
        launch(machine, ctx, None)
    }
}
