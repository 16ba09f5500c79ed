//! Refresh Scheduler
//!
//! Periodically refreshes a shared dashboard on a background task.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::controller::Dashboard;
use super::view::DashboardView;
use crate::api::InventoryApi;

/// Default time between refreshes
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Shortest period the loop will run at
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// A dashboard shared between the scheduler and user actions
pub type SharedDashboard<A, V> = Arc<Mutex<Dashboard<A, V>>>;

/// Starts periodic refreshes
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    interval: Duration,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

impl RefreshScheduler {
    /// Periods below [`MIN_REFRESH_INTERVAL`] are raised to it
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_REFRESH_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the refresh loop. The first refresh runs immediately.
    ///
    /// Dropping the returned handle stops the loop after the current refresh.
    pub fn start<A, V>(&self, dashboard: SharedDashboard<A, V>) -> RefreshHandle
    where
        A: InventoryApi + 'static,
        V: DashboardView + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let period = self.interval;

        let task = tokio::spawn(async move {
            tracing::info!(interval_secs = period.as_secs(), "Refresh scheduler started");

            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = stop_rx.changed() => break,
                }

                let mut dashboard = dashboard.lock().await;
                if dashboard.refresh().await.is_err() {
                    tracing::debug!("Scheduled refresh failed, retrying next tick");
                }
            }

            tracing::info!("Refresh scheduler stopped");
        });

        RefreshHandle { stop_tx, task }
    }
}

/// Control over a running refresh loop
#[derive(Debug)]
pub struct RefreshHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop after any in-flight refresh completes
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("Refresh scheduler task failed: {}", e);
        }
    }

    /// Abort immediately. An in-flight fetch is dropped before it can
    /// touch the snapshot.
    pub fn cancel(self) {
        self.task.abort();
        tracing::info!("Refresh scheduler cancelled");
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
