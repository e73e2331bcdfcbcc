//! Scripted sessions against the in-memory surface.
//!
//! Powers the `replay` CLI command: a JSON script of traces, inputs, waits
//! and detaches is played against a [`WidgetRuntime`](crate::WidgetRuntime)
//! and the resulting surface state is reported.

mod runner;
mod script;

pub use runner::{Replay, ReplayReport, StepOutcome};
pub use script::{Script, Step};
