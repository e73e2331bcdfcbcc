use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `tracewidgets`.
///
/// Nothing in the widget lifecycle propagates these past the session task;
/// they are logged and the widget degrades to "do nothing further". Callers
/// that embed the runtime can still match on them for config loading and
/// registry wiring.
#[derive(Debug, Error)]
pub enum WidgetError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Host surface ────────────────────────────────────────────────────
    #[error("host: {0}")]
    Host(#[from] HostError),

    // ── Webhook delivery ────────────────────────────────────────────────
    #[error("delivery: {0}")]
    Delivery(#[from] DeliveryError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Host errors ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host has not mounted the structure the widget needs yet.
    #[error("host surface not mounted")]
    NotMounted,

    #[error("host element not found: {0}")]
    NotFound(String),

    #[error("node {0} is detached")]
    Detached(String),
}

// ─── Delivery errors ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("no webhook url configured")]
    MissingUrl,

    #[error("invalid webhook url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("webhook {url} unreachable: {message}")]
    Transport { url: String, message: String },

    #[error("webhook {url} answered {status}")]
    Status { url: String, status: u16 },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, WidgetError>;
