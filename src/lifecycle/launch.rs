use super::cleanup::spawn_detach_watch;
use super::session::{SessionContext, spawn_session};
use super::{Disposer, InstanceMeta, Interaction, Mounted};
use crate::config::Config;
use crate::delivery::WebhookSink;
use crate::error::WidgetError;
use crate::host::{InputLock, Surface};
use crate::observability::{Observer, ObserverEvent};
use crate::trace::TraceConfig;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio_util::sync::CancellationToken;

/// Collaborators every widget session needs.
#[derive(Clone)]
pub struct Services {
    pub surface: Arc<dyn Surface>,
    pub sink: Arc<dyn WebhookSink>,
    pub observer: Arc<dyn Observer>,
    pub(crate) active_sessions: Arc<AtomicU64>,
}

impl Services {
    pub fn new(
        surface: Arc<dyn Surface>,
        sink: Arc<dyn WebhookSink>,
        observer: Arc<dyn Observer>,
    ) -> Self {
        Self {
            surface,
            sink,
            observer,
            active_sessions: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Sessions currently running.
    pub fn active_sessions(&self) -> u64 {
        self.active_sessions
            .load(std::sync::atomic::Ordering::Acquire)
    }
}

/// Everything a widget needs to render one instance.
#[derive(Clone)]
pub struct RenderContext {
    pub trace: TraceConfig,
    pub instance: InstanceMeta,
    pub services: Services,
    pub config: Arc<Config>,
}

/// Mount a node for `machine` and start its session.
///
/// A held `input_lock` is released if the host cannot mount the node.
pub fn launch<I: Interaction>(
    machine: I,
    ctx: &RenderContext,
    input_lock: Option<Arc<InputLock>>,
) -> Result<Mounted, WidgetError> {
    let services = &ctx.services;
    let instance = &ctx.instance;

    let node = match services.surface.mount(&instance.family, &instance.id) {
        Ok(node) => node,
        Err(e) => {
            if let Some(lock) = &input_lock {
                lock.release();
            }
            services.observer.record_event(&ObserverEvent::HostDegraded {
                operation: "mount".into(),
                message: e.to_string(),
            });
            return Err(e.into());
        }
    };

    services.observer.record_event(&ObserverEvent::RenderStarted {
        family: instance.family.clone(),
        instance_id: instance.id.clone(),
    });

    let token = CancellationToken::new();
    spawn_detach_watch(
        services.surface.watch_detach(&node),
        token.clone(),
        input_lock.clone(),
        Arc::clone(&services.observer),
        instance.family.clone(),
        instance.id.clone(),
    );

    let handle = spawn_session(
        machine,
        SessionContext {
            instance: instance.clone(),
            node: node.clone(),
            services: services.clone(),
            token: token.clone(),
            input_lock: input_lock.clone(),
        },
    );

    let disposer = Disposer::new(
        token,
        input_lock,
        Arc::clone(&services.observer),
        instance.family.clone(),
        instance.id.clone(),
    );

    Ok(Mounted {
        instance_id: Some(instance.id.clone()),
        node: Some(node),
        handle,
        disposer,
    })
}
