mod core;
mod delivery;
mod feedback;
mod observability;
mod render;
mod wizard;

pub use core::Config;
pub use delivery::DeliveryConfig;
pub use feedback::FeedbackConfig;
pub use observability::ObservabilityConfig;
pub use render::RenderConfig;
pub use wizard::WizardConfig;
