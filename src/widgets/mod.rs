//! Trace-triggered widgets and the registry that dispatches to them.

pub mod feedback;
pub mod handoff;
mod registry;
pub mod wizard;

pub use registry::{Widget, WidgetRegistry, trace_matches};

use serde::{Deserialize, Serialize};

/// User input addressed to one widget kind.
///
/// A session silently drops inputs addressed to another kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetInput {
    Feedback(feedback::FeedbackInput),
    Wizard(wizard::WizardInput),
    Handoff(handoff::HandoffInput),
}
