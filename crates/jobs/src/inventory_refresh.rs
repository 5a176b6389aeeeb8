use nimbus_dns_application::use_cases::RefreshInventoryUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodically re-reads the inventory and republishes the host directory.
///
/// The first tick is skipped: the caller is expected to run one cycle itself
/// before it starts serving. A cycle always runs to completion; cancellation
/// is only observed between cycles.
pub struct InventoryRefreshJob {
    refresher: Arc<RefreshInventoryUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl InventoryRefreshJob {
    pub fn new(refresher: Arc<RefreshInventoryUseCase>, interval: Duration) -> Self {
        Self {
            refresher,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Spawn the refresh loop. A zero interval means startup-only refresh and
    /// yields no handle.
    pub fn start(self) -> Option<RefreshJobHandle> {
        if self.interval.is_zero() {
            info!("Periodic inventory refresh disabled");
            return None;
        }

        info!(
            interval_secs = self.interval.as_secs(),
            "Starting inventory refresh job"
        );

        let shutdown = self.shutdown.clone();
        let task = tokio::spawn(async move { self.run().await });

        Some(RefreshJobHandle { shutdown, task })
    }

    async fn run(self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!("InventoryRefreshJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    debug!("InventoryRefreshJob: refreshing inventory");
                    // Failures are logged by the use case; the old directory stays published.
                    if self.refresher.execute().await.is_err() {
                        debug!("InventoryRefreshJob: cycle failed, retrying next tick");
                    }
                }
            }
        }
    }
}

/// Owner of a running refresh loop. Stopping consumes the handle, so the
/// stop signal can only be sent once.
pub struct RefreshJobHandle {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl RefreshJobHandle {
    /// Signal the loop and wait for it to exit. A cycle in flight finishes
    /// first.
    pub async fn stop(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Inventory refresh task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
