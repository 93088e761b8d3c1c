use std::time::Duration;

use carrier_tools::CarrierApi;
use log::*;
use shiptrack_engine::{events::ChannelDispatcher, ReconciliationApi, SqliteDatabase, StopSignal};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

pub type LiveReconciliationApi = ReconciliationApi<SqliteDatabase, CarrierApi, ChannelDispatcher>;

/// Starts the built-in reconciliation scheduler. The first run starts immediately.
///
/// The worker checks `stop` before every run and between shipments, and exits once it is raised.
pub fn start_reconcile_worker(api: LiveReconciliationApi, interval: Duration, stop: StopSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        // A run that overruns the interval should not be followed by a burst of catch-up runs
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("🕰️ Reconciliation worker started. Running every {}s", interval.as_secs());
        loop {
            timer.tick().await;
            if stop.is_stopped() {
                break;
            }
            info!("🕰️ Running scheduled reconciliation");
            match api.reconcile_until(&stop).await {
                Ok(summary) => info!("🕰️ Scheduled reconciliation complete. {summary}"),
                Err(e) => error!("🕰️ Scheduled reconciliation could not run. {e}"),
            }
        }
        info!("🕰️ Reconciliation worker stopped");
    })
}
