use crate::host::{InputLock, NodeId};
use crate::observability::{Observer, ObserverEvent};
use crate::widgets::WidgetInput;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct DisposerInner {
    token: CancellationToken,
    input_lock: Option<Arc<InputLock>>,
    observer: Arc<dyn Observer>,
    family: String,
    instance_id: String,
    disposed: AtomicBool,
}

/// Teardown callback returned by every render.
///
/// Idempotent, and safe to call on a render that never produced a widget.
#[derive(Clone)]
pub struct Disposer {
    inner: Option<Arc<DisposerInner>>,
}

impl Disposer {
    pub fn noop() -> Self {
        Self { inner: None }
    }

    pub(crate) fn new(
        token: CancellationToken,
        input_lock: Option<Arc<InputLock>>,
        observer: Arc<dyn Observer>,
        family: String,
        instance_id: String,
    ) -> Self {
        Self {
            inner: Some(Arc::new(DisposerInner {
                token,
                input_lock,
                observer,
                family,
                instance_id,
                disposed: AtomicBool::new(false),
            })),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.inner.is_none()
    }

    /// Stop the session and give back anything held from the host.
    pub fn dispose(&self) {
        let Some(inner) = &self.inner else {
            return;
        };
        if inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        inner.token.cancel();
        if let Some(lock) = &inner.input_lock {
            lock.release();
        }
        inner.observer.record_event(&ObserverEvent::Disposed {
            family: inner.family.clone(),
            instance_id: inner.instance_id.clone(),
            reason: "dispose".into(),
        });
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            None => f.write_str("Disposer(noop)"),
            Some(inner) => f
                .debug_struct("Disposer")
                .field("instance_id", &inner.instance_id)
                .field("disposed", &inner.disposed.load(Ordering::Acquire))
                .finish_non_exhaustive(),
        }
    }
}

/// Sender for user inputs into a live widget session.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    tx: Option<mpsc::UnboundedSender<WidgetInput>>,
}

impl WidgetHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<WidgetInput>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn closed() -> Self {
        Self { tx: None }
    }

    /// Forward a user input. Returns `false` once the session has ended.
    pub fn send(&self, input: impl Into<WidgetInput>) -> bool {
        self.tx
            .as_ref()
            .is_some_and(|tx| tx.send(input.into()).is_ok())
    }

    pub fn is_closed(&self) -> bool {
        self.tx.as_ref().is_none_or(mpsc::UnboundedSender::is_closed)
    }
}

/// Result of handling one trace.
#[derive(Debug, Clone)]
pub struct Mounted {
    pub instance_id: Option<String>,
    pub node: Option<NodeId>,
    pub handle: WidgetHandle,
    pub disposer: Disposer,
}

impl Mounted {
    /// Nothing was rendered: unmatched trace, suppressed duplicate or a
    /// host that could not mount.
    pub fn nothing() -> Self {
        Self {
            instance_id: None,
            node: None,
            handle: WidgetHandle::closed(),
            disposer: Disposer::noop(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.node.is_some()
    }
}
