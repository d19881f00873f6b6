//! Trailing-edge debounce for callbacks such as search-as-you-type.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{error, warn};

/// A debounced callback. See [`debounce`].
pub struct Debounced<A> {
    func: Arc<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Wrap `func` so that a burst of calls runs it once, `wait` after the last
/// call, with the last call's arguments.
///
/// A call made outside a tokio runtime is dropped with a warning.
pub fn debounce<A, F>(func: F, wait: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        func: Arc::new(func),
        wait,
        pending: Mutex::new(None),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Cancel any pending run and schedule `func(args)` after the wait.
    pub fn call(&self, args: A) {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Failed to acquire debounce lock: {e}");
                return;
            }
        };

        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime; debounced call dropped");
            return;
        };

        let func = Arc::clone(&self.func);
        let wait = self.wait;
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(wait).await;
            func(args);
        }));
    }

    /// Drop the pending run, if any
    pub fn cancel(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.take() {
                previous.abort();
            }
        }
    }

    /// Whether a run is scheduled and has not fired yet
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|pending| pending.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }
}
