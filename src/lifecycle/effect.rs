use super::TimerKind;
use crate::host::View;
use crate::trace::InteractionEvent;
use serde_json::Value;
use std::time::Duration;

/// How the session treats a delivery's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Outcome is logged and never reaches the machine.
    FireAndForget,
    /// Outcome is fed back through `Interaction::on_delivery`.
    Awaited,
}

/// A side effect requested by a widget state machine.
///
/// Machines stay pure; the session executes effects in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Render(View),
    ArmTimer { timer: TimerKind, after: Duration },
    CancelTimer(TimerKind),
    CancelAllTimers,
    Deliver {
        url: Option<String>,
        payload: Value,
        mode: DeliveryMode,
    },
    Dispatch(InteractionEvent),
    /// Give the host chat input back.
    ReleaseInput,
    /// Silently remove the node.
    FadeOut,
    /// The machine reached a terminal state; the session stops after the
    /// remaining effects run.
    Finish { outcome: String },
}

impl Effect {
    pub fn arm(timer: TimerKind, after: Duration) -> Self {
        Self::ArmTimer { timer, after }
    }

    pub fn finish(outcome: impl Into<String>) -> Self {
        Self::Finish {
            outcome: outcome.into(),
        }
    }
}
