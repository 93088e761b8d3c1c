use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration as StdDuration,
};

use chrono::{Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::{helpers::TrackingUrlTemplate, ste_api::errors::ReconcileError};

pub const DEFAULT_BATCH_SIZE: i64 = 50;
pub const DEFAULT_WAIT_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_CALL_INTERVAL: StdDuration = StdDuration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// The maximum number of shipments looked at in one run.
    pub batch_size: i64,
    /// Shipments younger than this that have no tracking number yet are not queried. The carrier takes a while to
    /// ingest new shipments.
    pub wait_window: Duration,
    /// The pause between consecutive carrier calls.
    pub call_interval: StdDuration,
    pub tracking_url_template: TrackingUrlTemplate,
    /// Where status change notifications are addressed.
    pub notification_destination: String,
    /// The carrier reports movement times as local wall-clock time at this offset from UTC.
    pub carrier_utc_offset: FixedOffset,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            wait_window: Duration::hours(DEFAULT_WAIT_WINDOW_HOURS),
            call_interval: DEFAULT_CALL_INTERVAL,
            tracking_url_template: TrackingUrlTemplate::default(),
            notification_destination: String::default(),
            carrier_utc_offset: Utc.fix(),
        }
    }
}

/// What happened to a single shipment during a run, when nothing went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentOutcome {
    /// Not queried, because it is still inside the wait-window.
    Skipped,
    /// Queried, and the carrier agrees with what we have.
    Unchanged,
    Updated { status_changed: bool, tracking_assigned: bool, delivered: bool, notified: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationRunSummary {
    /// Shipments the carrier was asked about.
    pub queried: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub updated: u32,
    /// Shipments that transitioned to `DELIVERED` in this run.
    pub delivered: u32,
    /// Candidates left alone because of the wait-window.
    pub skipped: u32,
    pub notified: u32,
}

impl ReconciliationRunSummary {
    pub fn record(&mut self, outcome: &Result<ShipmentOutcome, ReconcileError>) {
        match outcome {
            Ok(ShipmentOutcome::Skipped) => self.skipped += 1,
            Ok(ShipmentOutcome::Unchanged) => {
                self.queried += 1;
                self.succeeded += 1;
            },
            Ok(ShipmentOutcome::Updated { delivered, notified, .. }) => {
                self.queried += 1;
                self.succeeded += 1;
                self.updated += 1;
                self.delivered += u32::from(*delivered);
                self.notified += u32::from(*notified);
            },
            Err(_) => {
                self.queried += 1;
                self.failed += 1;
            },
        }
    }
}

impl Display for ReconciliationRunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} queried, {} succeeded, {} failed, {} updated, {} delivered, {} skipped, {} notified",
            self.queried, self.succeeded, self.failed, self.updated, self.delivered, self.skipped, self.notified
        )
    }
}

/// Asks a running reconciliation to stop once the shipment it is working on is done.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod test {
    use carrier_tools::CarrierApiError;

    use super::*;

    #[test]
    fn summary_counts() {
        let mut summary = ReconciliationRunSummary::default();
        summary.record(&Ok(ShipmentOutcome::Skipped));
        summary.record(&Ok(ShipmentOutcome::Unchanged));
        summary.record(&Ok(ShipmentOutcome::Updated {
            status_changed: true,
            tracking_assigned: false,
            delivered: true,
            notified: false,
        }));
        summary.record(&Err(ReconcileError::Carrier(CarrierApiError::Timeout(StdDuration::from_secs(15)))));
        let expected = ReconciliationRunSummary {
            queried: 3,
            succeeded: 2,
            failed: 1,
            updated: 1,
            delivered: 1,
            skipped: 1,
            notified: 0,
        };
        assert_eq!(summary, expected);
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["queried"], 3);
        assert_eq!(json["delivered"], 1);
    }

    #[test]
    fn stop_signal_is_shared() {
        let signal = StopSignal::default();
        let clone = signal.clone();
        assert!(!signal.is_stopped());
        clone.stop();
        assert!(signal.is_stopped());
    }
}
