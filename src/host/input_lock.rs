use super::Surface;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Holds the host chat input disabled until released.
///
/// Release is one-shot: detach notifications, explicit disposal and the
/// widget's own completion may all race to release, and the host sees exactly
/// one re-enable. A lock whose acquisition failed (no input container) holds
/// nothing and releases nothing.
pub struct InputLock {
    surface: Arc<dyn Surface>,
    held: bool,
    released: AtomicBool,
}

impl InputLock {
    pub fn acquire(surface: Arc<dyn Surface>) -> Arc<Self> {
        let held = match surface.set_input_enabled(false) {
            Ok(()) => true,
            Err(e) => {
                debug!(surface = surface.name(), error = %e, "input lock not acquired");
                false
            }
        };
        Arc::new(Self {
            surface,
            held,
            released: AtomicBool::new(false),
        })
    }

    pub fn is_held(&self) -> bool {
        self.held && !self.released.load(Ordering::Acquire)
    }

    /// Re-enable the host input. Returns `true` only for the call that
    /// actually re-enabled it.
    pub fn release(&self) -> bool {
        if !self.held || self.released.swap(true, Ordering::AcqRel) {
            return false;
        }
        if let Err(e) = self.surface.set_input_enabled(true) {
            debug!(surface = self.surface.name(), error = %e, "input re-enable failed");
        }
        true
    }
}

impl std::fmt::Debug for InputLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputLock")
            .field("held", &self.held)
            .field("released", &self.released.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}
