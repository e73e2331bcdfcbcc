use super::{DeliveryMode, Effect, InstanceMeta, Interaction, Services, TimerSet, WidgetHandle};
use crate::error::{DeliveryError, HostError};
use crate::host::{InputLock, NodeId};
use crate::observability::{ObserverEvent, ObserverMetric};
use crate::widgets::WidgetInput;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub(super) struct SessionContext {
    pub instance: InstanceMeta,
    pub node: NodeId,
    pub services: Services,
    pub token: CancellationToken,
    pub input_lock: Option<Arc<InputLock>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Finish,
}

enum Wake {
    Cancelled,
    Input(WidgetInput),
    InputsClosed,
    Delivery(Result<(), DeliveryError>),
    TimerDue,
}

pub(super) fn spawn_session<I: Interaction>(machine: I, ctx: SessionContext) -> WidgetHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run(machine, ctx, rx));
    WidgetHandle::new(tx)
}

async fn run<I: Interaction>(
    mut machine: I,
    ctx: SessionContext,
    inputs: mpsc::UnboundedReceiver<WidgetInput>,
) {
    let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
    let mut session = Session {
        ctx,
        timers: TimerSet::new(),
        delivery_tx,
    };

    session.adjust_active(true);
    let effects = machine.start();
    if session.apply(effects) == Flow::Continue && !machine.is_finished() {
        session.drive(&mut machine, inputs, delivery_rx).await;
    }
    session.adjust_active(false);
    debug!(instance = %session.ctx.instance.id, "widget session ended");
}

struct Session {
    ctx: SessionContext,
    timers: TimerSet,
    delivery_tx: mpsc::UnboundedSender<Result<(), DeliveryError>>,
}

impl Session {
    async fn drive<I: Interaction>(
        &mut self,
        machine: &mut I,
        mut inputs: mpsc::UnboundedReceiver<WidgetInput>,
        mut deliveries: mpsc::UnboundedReceiver<Result<(), DeliveryError>>,
    ) {
        let mut inputs_open = true;

        loop {
            let deadline = self.timers.next_deadline();
            let wake = tokio::select! {
                biased;
                () = self.ctx.token.cancelled() => Wake::Cancelled,
                Some(result) = deliveries.recv() => Wake::Delivery(result),
                input = inputs.recv(), if inputs_open => match input {
                    Some(input) => Wake::Input(input),
                    None => Wake::InputsClosed,
                },
                () = sleep_until(deadline) => Wake::TimerDue,
            };

            let effects = match wake {
                Wake::Cancelled => {
                    debug!(instance = %self.ctx.instance.id, "widget session cancelled");
                    return;
                }
                Wake::InputsClosed => {
                    inputs_open = false;
                    continue;
                }
                Wake::Input(_) | Wake::TimerDue if self.orphaned() => return,
                Wake::Input(input) => match I::Input::try_from(input) {
                    Ok(input) => {
                        debug!(instance = %self.ctx.instance.id, input = ?input, "widget input");
                        machine.on_input(input)
                    }
                    Err(_) => {
                        debug!(instance = %self.ctx.instance.id, "input for another widget ignored");
                        continue;
                    }
                },
                Wake::Delivery(result) => machine.on_delivery(result),
                Wake::TimerDue => {
                    let Some(timer) = self.timers.take_due(Instant::now()) else {
                        continue;
                    };
                    self.ctx
                        .services
                        .observer
                        .record_event(&ObserverEvent::TimerFired {
                            instance_id: self.ctx.instance.id.clone(),
                            timer,
                        });
                    machine.on_timer(timer)
                }
            };

            if self.apply(effects) == Flow::Finish || machine.is_finished() {
                return;
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Flow {
        let mut flow = Flow::Continue;
        for effect in effects {
            match effect {
                Effect::Render(view) => {
                    if let Err(e) = self.ctx.services.surface.render(&self.ctx.node, &view) {
                        self.degraded("render", &e);
                    }
                }
                Effect::ArmTimer { timer, after } => {
                    self.timers.arm(timer, Instant::now(), after);
                }
                Effect::CancelTimer(timer) => self.timers.cancel(timer),
                Effect::CancelAllTimers => self.timers.cancel_all(),
                Effect::Deliver { url, payload, mode } => self.deliver(url, payload, mode),
                Effect::Dispatch(event) => {
                    if let Err(e) = self.ctx.services.surface.dispatch(&event) {
                        self.degraded("dispatch", &e);
                    }
                }
                Effect::ReleaseInput => {
                    if let Some(lock) = &self.ctx.input_lock {
                        lock.release();
                    }
                }
                Effect::FadeOut => self.ctx.services.surface.remove(&self.ctx.node),
                Effect::Finish { outcome } => {
                    self.ctx
                        .services
                        .observer
                        .record_event(&ObserverEvent::Completed {
                            family: self.ctx.instance.family.clone(),
                            instance_id: self.ctx.instance.id.clone(),
                            outcome,
                        });
                    flow = Flow::Finish;
                }
            }
        }
        flow
    }

    /// Stop the session when its node has left the surface, whether or not
    /// the host's detach signal ever fired.
    fn orphaned(&self) -> bool {
        let surface = &self.ctx.services.surface;
        if surface.is_connected(&self.ctx.node) {
            return false;
        }
        debug!(instance = %self.ctx.instance.id, "widget node gone, stopping session");
        self.ctx.token.cancel();
        if let Some(lock) = &self.ctx.input_lock {
            lock.release();
        }
        self.ctx
            .services
            .observer
            .record_event(&ObserverEvent::Disposed {
                family: self.ctx.instance.family.clone(),
                instance_id: self.ctx.instance.id.clone(),
                reason: "detached".into(),
            });
        true
    }

    fn deliver(&self, url: Option<String>, payload: Value, mode: DeliveryMode) {
        let sink = Arc::clone(&self.ctx.services.sink);
        let observer = Arc::clone(&self.ctx.services.observer);
        let family = self.ctx.instance.family.clone();
        let instance_id = self.ctx.instance.id.clone();
        let reply = (mode == DeliveryMode::Awaited).then(|| self.delivery_tx.clone());

        tokio::spawn(async move {
            let result = match url.as_deref() {
                Some(url) => {
                    let started = Instant::now();
                    let result = sink.deliver(url, &payload).await;
                    observer.record_metric(&ObserverMetric::DeliveryLatency(started.elapsed()));
                    result
                }
                None => Err(DeliveryError::MissingUrl),
            };

            if let Err(e) = &result {
                warn!(family = %family, instance = %instance_id, error = %e, "webhook delivery failed");
                observer.record_event(&ObserverEvent::DeliveryFailed {
                    family,
                    instance_id,
                    message: e.to_string(),
                });
            }

            if let Some(reply) = reply {
                // The session may be gone already; nothing to tell then.
                let _ = reply.send(result);
            }
        });
    }

    fn degraded(&self, operation: &str, error: &HostError) {
        debug!(instance = %self.ctx.instance.id, operation, error = %error, "host operation skipped");
        self.ctx
            .services
            .observer
            .record_event(&ObserverEvent::HostDegraded {
                operation: operation.to_string(),
                message: error.to_string(),
            });
    }

    fn adjust_active(&self, started: bool) {
        let counter = &self.ctx.services.active_sessions;
        let now = if started {
            counter.fetch_add(1, Ordering::AcqRel) + 1
        } else {
            counter.fetch_sub(1, Ordering::AcqRel).saturating_sub(1)
        };
        self.ctx
            .services
            .observer
            .record_metric(&ObserverMetric::ActiveSessions(now));
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
