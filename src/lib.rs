#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod delivery;
pub mod error;
pub mod host;
pub mod lifecycle;
#[doc(hidden)]
pub mod observability;
pub mod render;
pub mod replay;
pub mod runtime;
pub mod trace;
pub mod widgets;

pub use config::Config;
pub use error::{DeliveryError, HostError, WidgetError};
pub use lifecycle::{Disposer, Mounted, WidgetHandle};
pub use runtime::WidgetRuntime;
pub use trace::{InteractionEvent, TraceEvent};
pub use widgets::{Widget, WidgetInput, WidgetRegistry};
