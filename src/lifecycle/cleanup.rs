use crate::host::{DetachSignal, InputLock};
use crate::observability::{Observer, ObserverEvent};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Watch for the node leaving the live surface.
///
/// Fires at most once: on detach it stops the session and releases the host
/// input, then the watcher ends. Disposal (token cancelled first) ends the
/// watcher without firing.
pub(super) fn spawn_detach_watch(
    signal: DetachSignal,
    token: CancellationToken,
    input_lock: Option<Arc<InputLock>>,
    observer: Arc<dyn Observer>,
    family: String,
    instance_id: String,
) {
    tokio::spawn(async move {
        tokio::select! {
            () = signal.detached() => {
                debug!(instance = %instance_id, "widget node detached");
                token.cancel();
                if let Some(lock) = input_lock {
                    lock.release();
                }
                observer.record_event(&ObserverEvent::Disposed {
                    family,
                    instance_id,
                    reason: "detached".into(),
                });
            }
            () = token.cancelled() => {}
        }
    });
}
