use crate::clock::update_date_time;
use crate::config::{Clock, Config};
use crate::page::Page;
use crate::poller::{DashboardPoller, DashboardRefresh};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Page-load wiring: the clock, the dashboard poller and their shutdown.
pub struct Runtime {
    page: Arc<Page>,
    poller: DashboardPoller,
    cancel_token: CancellationToken,
    clock_task: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Boot the runtime for `page`.
    ///
    /// Renders the clock immediately and then on every clock interval, and
    /// starts dashboard polling when the page path is a dashboard path.
    /// Must be called inside a tokio runtime.
    pub fn boot(
        page: Arc<Page>,
        config: &Config,
        hook: Option<Arc<dyn DashboardRefresh>>,
    ) -> Self {
        let cancel_token = CancellationToken::new();

        let clock_task = (config.clock != Clock::None).then(|| {
            update_date_time(&page, config.clock);
            spawn_clock(
                Arc::clone(&page),
                config.clock,
                config.clock_refresh_interval(),
                cancel_token.clone(),
            )
        });

        let poller = DashboardPoller::new(config.dashboard_refresh_interval(), hook);
        if config.is_dashboard_path(page.path()) {
            poller.start();
        } else {
            debug!("{} is not a dashboard page; polling stays off", page.path());
        }

        info!("📚 Library Logger initialized");

        Self {
            page,
            poller,
            cancel_token,
            clock_task,
        }
    }

    #[must_use]
    pub fn page(&self) -> &Arc<Page> {
        &self.page
    }

    #[must_use]
    pub fn poller(&self) -> &DashboardPoller {
        &self.poller
    }

    /// Token cancelled by [`Runtime::shutdown`]
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Stop the clock and the dashboard poller, waiting for the clock task
    pub async fn shutdown(mut self) {
        self.cancel_token.cancel();
        self.poller.stop();
        if let Some(task) = self.clock_task.take() {
            join_logged(task, "Clock").await;
        }
        info!("Library Logger runtime stopped");
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Wait for `task`, logging a panic or abort instead of propagating it.
/// Returns whether the task finished cleanly.
async fn join_logged(task: JoinHandle<()>, name: &str) -> bool {
    match task.await {
        Ok(()) => true,
        Err(e) => {
            error!("{name} task failed: {e}");
            false
        }
    }
}

fn spawn_clock(
    page: Arc<Page>,
    clock: Clock,
    period: Duration,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    let first_tick = Instant::now() + period;
    tokio::spawn(async move {
        let mut ticker = interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                () = cancel_token.cancelled() => {
                    debug!("Clock task cancelled");
                    break;
                }
                _ = ticker.tick() => update_date_time(&page, clock),
            }
        }
    })
}
