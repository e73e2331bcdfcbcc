pub mod schema;

pub use schema::{
    Config, DeliveryConfig, FeedbackConfig, ObservabilityConfig, RenderConfig, WizardConfig,
};
