use super::{DetachSignal, NodeId, Surface, View};
use crate::error::HostError;
use crate::trace::InteractionEvent;
use serde::Serialize;
use std::sync::Mutex;
use tokio::sync::watch;

struct NodeEntry {
    id: NodeId,
    family: String,
    instance_id: String,
    view: View,
    history: Vec<&'static str>,
    detach: watch::Sender<bool>,
}

impl NodeEntry {
    fn attached(&self) -> bool {
        !*self.detach.borrow()
    }
}

#[derive(Default)]
struct SurfaceState {
    next_id: u64,
    nodes: Vec<NodeEntry>,
    input_enabled: bool,
    input_toggles: Vec<bool>,
    dispatched: Vec<InteractionEvent>,
}

/// In-memory chat surface.
///
/// Keeps every node it ever mounted (detached ones included) so callers can
/// inspect what happened after the fact.
pub struct MemorySurface {
    state: Mutex<SurfaceState>,
    mounted: bool,
    has_input: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub family: String,
    pub instance_id: String,
    pub attached: bool,
    pub view: View,
    pub history: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub input_enabled: bool,
    pub input_toggles: Vec<bool>,
    pub dispatched: Vec<InteractionEvent>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::with_flags(true, true)
    }

    /// A surface whose message list has not been mounted yet: lookups fail
    /// with [`HostError::NotMounted`].
    pub fn unmounted() -> Self {
        Self::with_flags(false, true)
    }

    /// A surface without a chat input container.
    pub fn without_input() -> Self {
        Self::with_flags(true, false)
    }

    fn with_flags(mounted: bool, has_input: bool) -> Self {
        Self {
            state: Mutex::new(SurfaceState {
                input_enabled: true,
                ..SurfaceState::default()
            }),
            mounted,
            has_input,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SurfaceState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn view_of(&self, node: &NodeId) -> Option<View> {
        self.lock()
            .nodes
            .iter()
            .find(|n| &n.id == node)
            .map(|n| n.view.clone())
    }

    /// Names of every view rendered into `node`, oldest first.
    pub fn history_of(&self, node: &NodeId) -> Vec<&'static str> {
        self.lock()
            .nodes
            .iter()
            .find(|n| &n.id == node)
            .map(|n| n.history.clone())
            .unwrap_or_default()
    }

    /// Newest node mounted for `instance_id`.
    pub fn node_for_instance(&self, instance_id: &str) -> Option<NodeId> {
        self.lock()
            .nodes
            .iter()
            .rev()
            .find(|n| n.instance_id == instance_id)
            .map(|n| n.id.clone())
    }

    pub fn attached_nodes(&self, family: &str) -> Vec<NodeId> {
        self.lock()
            .nodes
            .iter()
            .filter(|n| n.family == family && n.attached())
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn mounted_count(&self, family: &str) -> usize {
        self.lock()
            .nodes
            .iter()
            .filter(|n| n.family == family)
            .count()
    }

    pub fn input_enabled(&self) -> bool {
        self.lock().input_enabled
    }

    /// Every input toggle in order, `false` for disable and `true` for enable.
    pub fn input_toggles(&self) -> Vec<bool> {
        self.lock().input_toggles.clone()
    }

    pub fn dispatched(&self) -> Vec<InteractionEvent> {
        self.lock().dispatched.clone()
    }

    /// Fire a detach notification without forgetting the node, the way a
    /// host re-parenting or clearing its message list would.
    pub fn detach(&self, node: &NodeId) {
        let state = self.lock();
        if let Some(entry) = state.nodes.iter().find(|n| &n.id == node) {
            entry.detach.send_replace(true);
        }
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        let state = self.lock();
        SurfaceSnapshot {
            nodes: state
                .nodes
                .iter()
                .map(|n| NodeSnapshot {
                    id: n.id.clone(),
                    family: n.family.clone(),
                    instance_id: n.instance_id.clone(),
                    attached: n.attached(),
                    view: n.view.clone(),
                    history: n.history.clone(),
                })
                .collect(),
            input_enabled: state.input_enabled,
            input_toggles: state.input_toggles.clone(),
            dispatched: state.dispatched.clone(),
        }
    }
}

impl Surface for MemorySurface {
    fn mount(&self, family: &str, instance_id: &str) -> Result<NodeId, HostError> {
        if !self.mounted {
            return Err(HostError::NotMounted);
        }
        let mut state = self.lock();
        state.next_id += 1;
        let id = NodeId(format!("node-{}", state.next_id));
        let (detach, _) = watch::channel(false);
        state.nodes.push(NodeEntry {
            id: id.clone(),
            family: family.to_string(),
            instance_id: instance_id.to_string(),
            view: View::Empty,
            history: Vec::new(),
            detach,
        });
        Ok(id)
    }

    fn render(&self, node: &NodeId, view: &View) -> Result<(), HostError> {
        let mut state = self.lock();
        let entry = state
            .nodes
            .iter_mut()
            .find(|n| &n.id == node)
            .ok_or_else(|| HostError::NotFound(node.to_string()))?;
        if !entry.attached() {
            return Err(HostError::Detached(node.to_string()));
        }
        entry.view = view.clone();
        entry.history.push(view.name());
        Ok(())
    }

    fn find_attached(&self, family: &str) -> Result<Option<NodeId>, HostError> {
        if !self.mounted {
            return Err(HostError::NotMounted);
        }
        Ok(self
            .lock()
            .nodes
            .iter()
            .find(|n| n.family == family && n.attached())
            .map(|n| n.id.clone()))
    }

    fn remove(&self, node: &NodeId) {
        self.detach(node);
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.lock()
            .nodes
            .iter()
            .any(|n| &n.id == node && n.attached())
    }

    fn watch_detach(&self, node: &NodeId) -> DetachSignal {
        let state = self.lock();
        match state.nodes.iter().find(|n| &n.id == node) {
            Some(entry) => DetachSignal::new(entry.detach.subscribe()),
            // Unknown nodes are already gone.
            None => {
                let (tx, rx) = watch::channel(true);
                drop(tx);
                DetachSignal::new(rx)
            }
        }
    }

    fn set_input_enabled(&self, enabled: bool) -> Result<(), HostError> {
        if !self.has_input {
            return Err(HostError::NotFound("chat input".into()));
        }
        let mut state = self.lock();
        state.input_enabled = enabled;
        state.input_toggles.push(enabled);
        Ok(())
    }

    fn dispatch(&self, event: &InteractionEvent) -> Result<(), HostError> {
        self.lock().dispatched.push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
