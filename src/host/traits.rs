use crate::error::HostError;
use crate::trace::InteractionEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::watch;

use super::View;

/// Opaque handle to a node the host created for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One-shot notification that a node left the live surface.
///
/// Resolves when the host flips the node to detached, or when the host drops
/// its side of the channel (a torn-down surface has no attached nodes).
#[derive(Debug)]
pub struct DetachSignal {
    rx: watch::Receiver<bool>,
    _keepalive: Option<watch::Sender<bool>>,
}

impl DetachSignal {
    pub fn new(rx: watch::Receiver<bool>) -> Self {
        Self {
            rx,
            _keepalive: None,
        }
    }

    /// A signal that never fires, for hosts without mutation observation.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            rx,
            _keepalive: Some(tx),
        }
    }

    pub async fn detached(mut self) {
        // Err means the sender is gone, which counts as detached.
        let _ = self.rx.wait_for(|detached| *detached).await;
    }
}

/// Host chat runtime capabilities a widget needs.
///
/// All calls are synchronous: they model DOM operations that complete within
/// one event-loop turn. Failures are reported, never panicked on; callers
/// treat every [`HostError`] as "do nothing further".
pub trait Surface: Send + Sync {
    /// Create an empty node for a widget instance inside the chat surface.
    fn mount(&self, family: &str, instance_id: &str) -> Result<NodeId, HostError>;

    /// Replace the node's current view.
    fn render(&self, node: &NodeId, view: &View) -> Result<(), HostError>;

    /// Locate a still-attached node of `family`, if any.
    ///
    /// `Err(HostError::NotMounted)` means the host structure does not exist
    /// yet.
    fn find_attached(&self, family: &str) -> Result<Option<NodeId>, HostError>;

    /// Detach and drop a node. Removing an unknown node is a no-op.
    fn remove(&self, node: &NodeId);

    fn is_connected(&self, node: &NodeId) -> bool;

    /// Subscribe to the node's removal. Every call returns an independent
    /// signal.
    fn watch_detach(&self, node: &NodeId) -> DetachSignal;

    /// Toggle the host-owned chat input affordance.
    fn set_input_enabled(&self, enabled: bool) -> Result<(), HostError>;

    /// Send an outbound interaction event back to the conversation runtime.
    fn dispatch(&self, event: &InteractionEvent) -> Result<(), HostError>;

    fn name(&self) -> &str;
}
