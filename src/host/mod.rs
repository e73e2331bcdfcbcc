//! The host chat surface a widget renders into.
//!
//! Widgets never touch a concrete DOM. They talk to a [`Surface`], which the
//! embedding host implements; [`MemorySurface`] is the in-process
//! implementation used by tests and the replay CLI.

mod input_lock;
mod memory;
mod traits;
mod view;

pub use input_lock::InputLock;
pub use memory::{MemorySurface, NodeSnapshot, SurfaceSnapshot};
pub use traits::{DetachSignal, NodeId, Surface};
pub use view::View;
