//! Shared lifecycle for ephemeral widgets.
//!
//! Every widget is a pure [`Interaction`] state machine. [`launch`] mounts
//! its node, starts a session task that feeds the machine one event at a
//! time (inputs, timer expiries, delivery outcomes) and executes the
//! [`Effect`]s it returns, and hands back a [`Mounted`] carrying the
//! [`Disposer`] the host calls on teardown.

mod cleanup;
mod disposer;
mod effect;
mod guard;
mod instance;
mod interaction;
mod launch;
mod session;
mod timers;

pub use disposer::{Disposer, Mounted, WidgetHandle};
pub use effect::{DeliveryMode, Effect};
pub use guard::{CompletionGuard, SubmissionGuard};
pub use instance::InstanceMeta;
pub use interaction::Interaction;
pub use launch::{RenderContext, Services, launch};
pub use timers::{TimerKind, TimerSet};
