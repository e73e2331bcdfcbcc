//! Render admission: suppress host re-deliveries and evict stale instances.

mod cooldown;
mod guard;

pub use cooldown::{CooldownStore, MemoryCooldownStore};
pub use guard::{Admission, RenderGuard};
