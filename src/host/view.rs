use crate::widgets::wizard::{Country, Field, LeadFields, Priority};
use serde::Serialize;

/// What a widget node currently shows.
///
/// Presentation markup is the host's business; a view only carries the state
/// the markup needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// Freshly mounted node with nothing drawn yet.
    Empty,
    FeedbackPrompt {
        rating: Option<u8>,
        comment_open: bool,
    },
    FeedbackThanks {
        rating: Option<u8>,
    },
    WizardStep {
        step: u8,
        total: u8,
        fields: LeadFields,
        invalid: Vec<Field>,
        suggestions: Vec<Country>,
        error: Option<String>,
    },
    WizardLoading,
    WizardSuccess {
        priority: Priority,
    },
    HandoffNotice {
        message: String,
    },
    HandoffReleased,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::FeedbackPrompt { .. } => "feedback_prompt",
            Self::FeedbackThanks { .. } => "feedback_thanks",
            Self::WizardStep { .. } => "wizard_step",
            Self::WizardLoading => "wizard_loading",
            Self::WizardSuccess { .. } => "wizard_success",
            Self::HandoffNotice { .. } => "handoff_notice",
            Self::HandoffReleased => "handoff_released",
        }
    }
}
