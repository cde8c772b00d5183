use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Collapses bursts of triggers into one invocation of an async action.
///
/// Each [`trigger`](Debouncer::trigger) discards the pending invocation (if any) and schedules
/// the action with the new argument once `delay` passes without another trigger. Only the
/// waiting period is cancellable: once the action has started it runs to completion on its
/// own task. The action's outcome is never reported back to the caller.
pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self {
            delay,
            action: Arc::new(action),
            pending: None,
        }
    }

    /// Schedule the action for `arg`. Must be called from within a tokio runtime.
    pub fn trigger(&mut self, arg: T) {
        self.cancel();

        let delay = self.delay;
        let action = Arc::clone(&self.action);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detach so a later cancel cannot abort a call that already started.
            tokio::spawn(action(arg));
        }));
    }

    /// Drop the scheduled invocation, if it has not fired yet.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
