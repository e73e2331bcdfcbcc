use super::{Script, Step};
use crate::host::{MemorySurface, SurfaceSnapshot};
use crate::lifecycle::Mounted;
use crate::runtime::WidgetRuntime;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of one step, in script order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Mounted { instance_id: String },
    Suppressed,
    Delivered { instance_id: String },
    Dropped,
    Waited { ms: u64 },
    Detached { instance_id: String },
    Disposed { instance_id: String },
    NoTarget,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub outcomes: Vec<StepOutcome>,
    pub active_sessions: u64,
    pub surface: SurfaceSnapshot,
}

/// Drives a [`Script`] against a runtime backed by a [`MemorySurface`].
pub struct Replay {
    runtime: WidgetRuntime,
    surface: Arc<MemorySurface>,
    mounted: Vec<Mounted>,
    settle: Duration,
}

impl Replay {
    pub fn new(runtime: WidgetRuntime, surface: Arc<MemorySurface>) -> Self {
        Self {
            runtime,
            surface,
            mounted: Vec::new(),
            settle: Duration::ZERO,
        }
    }

    /// Extra time to let in-flight deliveries finish after the last step.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Ids repeat when the same message renders again after the cooldown;
    /// the newest mount wins.
    fn target(&self, id: Option<&str>) -> Option<&Mounted> {
        match id {
            Some(id) => self
                .mounted
                .iter()
                .rev()
                .find(|m| m.instance_id.as_deref() == Some(id)),
            None => self.mounted.last(),
        }
    }

    pub async fn run(mut self, script: Script) -> ReplayReport {
        let mut outcomes = Vec::with_capacity(script.steps.len());
        for (index, step) in script.steps.into_iter().enumerate() {
            debug!(step = index, ?step, "replay step");
            let outcome = self.step(step).await;
            // Let sessions drain whatever the step queued.
            tokio::task::yield_now().await;
            outcomes.push(outcome);
        }
        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }

        info!(steps = outcomes.len(), "replay finished");
        ReplayReport {
            outcomes,
            active_sessions: self.runtime.active_sessions(),
            surface: self.surface.snapshot(),
        }
    }

    async fn step(&mut self, step: Step) -> StepOutcome {
        match step {
            Step::Trace(event) => {
                let mounted = self.runtime.handle(&event);
                match mounted.instance_id.clone() {
                    Some(instance_id) => {
                        self.mounted.push(mounted);
                        StepOutcome::Mounted { instance_id }
                    }
                    None => StepOutcome::Suppressed,
                }
            }
            Step::Input { target, input } => {
                let Some(mounted) = self.target(target.as_deref()) else {
                    warn!(target = ?target, "input without a live target");
                    return StepOutcome::NoTarget;
                };
                let instance_id = mounted.instance_id.clone().unwrap_or_default();
                if mounted.handle.send(input) {
                    StepOutcome::Delivered { instance_id }
                } else {
                    StepOutcome::Dropped
                }
            }
            Step::Wait { ms } => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                StepOutcome::Waited { ms }
            }
            Step::Detach { target } => {
                let Some(mounted) = self.target(target.as_deref()) else {
                    return StepOutcome::NoTarget;
                };
                let instance_id = mounted.instance_id.clone().unwrap_or_default();
                if let Some(node) = &mounted.node {
                    self.surface.detach(node);
                }
                StepOutcome::Detached { instance_id }
            }
            Step::Dispose { target } => {
                let Some(mounted) = self.target(target.as_deref()) else {
                    return StepOutcome::NoTarget;
                };
                mounted.disposer.dispose();
                StepOutcome::Disposed {
                    instance_id: mounted.instance_id.clone().unwrap_or_default(),
                }
            }
        }
    }
}
