//! Last-render timestamps per widget family.
//!
//! In-memory only; resets with the hosting process.

use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;

/// Process-scoped family → last successful render store.
///
/// Injected into the [`RenderGuard`](super::RenderGuard) so tests can fake
/// or reset it.
pub trait CooldownStore: Send + Sync {
    fn last_render(&self, family: &str) -> Option<Instant>;

    fn record(&self, family: &str, at: Instant);

    fn reset(&self);
}

#[derive(Default)]
pub struct MemoryCooldownStore {
    slots: Mutex<HashMap<String, Instant>>,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, Instant>> {
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CooldownStore for MemoryCooldownStore {
    fn last_render(&self, family: &str) -> Option<Instant> {
        self.slots().get(family).copied()
    }

    fn record(&self, family: &str, at: Instant) {
        self.slots().insert(family.to_string(), at);
    }

    fn reset(&self) {
        self.slots().clear();
    }
}

impl std::fmt::Debug for MemoryCooldownStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCooldownStore")
            .field("families", &self.slots().len())
            .finish()
    }
}
