//! Periodic dashboard refresh.

use async_trait::async_trait;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Work run on every dashboard tick, e.g. re-fetching the stats panel.
#[async_trait]
pub trait DashboardRefresh: Send + Sync {
    async fn refresh(&self);
}

#[async_trait]
impl<F, Fut> DashboardRefresh for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn refresh(&self) {
        (self)().await;
    }
}

/// Owns the dashboard's refresh timer.
///
/// At most one timer runs per poller: `start` on a running poller is refused.
pub struct DashboardPoller {
    interval: Duration,
    hook: Option<Arc<dyn DashboardRefresh>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardPoller {
    /// `hook` is optional; without one the timer still ticks but does nothing.
    #[must_use]
    pub fn new(interval: Duration, hook: Option<Arc<dyn DashboardRefresh>>) -> Self {
        Self {
            interval,
            hook,
            task: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking. The first tick fires one full interval from now.
    ///
    /// Each tick runs the hook as its own task, so a slow or hung refresh
    /// never delays the next tick. Stopping the poller aborts refreshes still
    /// in flight.
    ///
    /// Returns false, leaving the running timer untouched, if the poller is
    /// already running or no tokio runtime is available.
    pub fn start(&self) -> bool {
        let mut task = match self.task.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Failed to acquire poller lock: {e}");
                return false;
            }
        };

        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            warn!("Dashboard refresh already running; ignoring start");
            return false;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime; dashboard refresh not started");
            return false;
        };

        let period = self.interval;
        let first_tick = Instant::now() + period;
        let hook = self.hook.clone();
        *task = Some(runtime.spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut in_flight = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => match &hook {
                        Some(hook) => {
                            let hook = Arc::clone(hook);
                            in_flight.spawn(async move { hook.refresh().await });
                        }
                        None => debug!("Dashboard tick with no refresh hook"),
                    },
                    Some(finished) = in_flight.join_next() => {
                        if let Err(e) = finished {
                            error!("Dashboard refresh task failed: {e}");
                        }
                    }
                }
            }
        }));

        info!("Dashboard refresh started every {:?}", self.interval);
        true
    }

    /// Stop ticking. No-op if not running.
    pub fn stop(&self) {
        match self.task.lock() {
            Ok(mut task) => {
                if let Some(handle) = task.take() {
                    handle.abort();
                    info!("Dashboard refresh stopped");
                }
            }
            Err(e) => error!("Failed to acquire poller lock: {e}"),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .map(|task| task.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }
}

impl Drop for DashboardPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
