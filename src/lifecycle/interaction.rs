use super::{Effect, TimerKind};
use crate::error::DeliveryError;
use crate::widgets::WidgetInput;

/// A widget's pure state machine.
///
/// The session feeds it exactly one event at a time and executes the
/// returned effects before feeding the next one.
pub trait Interaction: Send + 'static {
    type Input: TryFrom<WidgetInput> + Send + std::fmt::Debug + 'static;

    /// Effects to run right after mounting.
    fn start(&mut self) -> Vec<Effect>;

    fn on_input(&mut self, input: Self::Input) -> Vec<Effect>;

    fn on_timer(&mut self, _timer: TimerKind) -> Vec<Effect> {
        Vec::new()
    }

    /// Outcome of an [`Awaited`](super::DeliveryMode::Awaited) delivery.
    fn on_delivery(&mut self, _result: Result<(), DeliveryError>) -> Vec<Effect> {
        Vec::new()
    }

    fn is_finished(&self) -> bool;
}
