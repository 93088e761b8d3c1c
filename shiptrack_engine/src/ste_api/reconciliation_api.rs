use std::fmt::Debug;

use chrono::{DateTime, TimeZone, Utc};
use log::*;

use super::{
    errors::ReconcileError,
    rate_limit::CallPacer,
    reconcile_objects::{ReconcileOptions, ReconciliationRunSummary, ShipmentOutcome, StopSignal},
};
use crate::{
    db_types::{CanonicalStatus, ShipmentRecord, ShipmentUpdate},
    helpers::normalize,
    traits::{CarrierGateway, NotificationDispatcher, ShipmentManagement, ShipmentNotification},
};

/// `ReconciliationApi` brings locally stored shipments in line with the carrier's system of record.
///
/// A run is a sequential pass over a batch of candidates. For each one the carrier is queried, its answer is
/// normalized and compared with what is stored, and only real differences are written back. A failure affects only
/// the shipment it happened on; it is logged, counted and retried on the next run.
pub struct ReconciliationApi<B, C, N> {
    db: B,
    carrier: C,
    dispatcher: N,
    options: ReconcileOptions,
}

impl<B, C, N> Debug for ReconciliationApi<B, C, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReconciliationApi ({:?})", self.options)
    }
}

impl<B, C, N> ReconciliationApi<B, C, N> {
    pub fn new(db: B, carrier: C, dispatcher: N, options: ReconcileOptions) -> Self {
        Self { db, carrier, dispatcher, options }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    fn within_wait_window(&self, shipment: &ShipmentRecord, now: DateTime<Utc>) -> bool {
        !shipment.has_tracking_number() && now - shipment.dispatched_at < self.options.wait_window
    }
}

impl<B, C, N> ReconciliationApi<B, C, N>
where
    B: ShipmentManagement,
    C: CarrierGateway,
    N: NotificationDispatcher,
{
    /// Runs a full reconciliation pass.
    ///
    /// The only error returned is a failure to load the candidate list. Everything that goes wrong with an individual
    /// shipment is reflected in the summary instead.
    pub async fn reconcile(&self) -> Result<ReconciliationRunSummary, ReconcileError> {
        self.reconcile_until(&StopSignal::default()).await
    }

    /// As [`Self::reconcile`], but checks `stop` between shipments and ends the run early once it is raised.
    pub async fn reconcile_until(&self, stop: &StopSignal) -> Result<ReconciliationRunSummary, ReconcileError> {
        let now = Utc::now();
        let candidates = self.db.fetch_reconciliation_candidates(self.options.batch_size).await?;
        info!("🔄️ Reconciliation run started with {} candidates", candidates.len());
        let mut summary = ReconciliationRunSummary::default();
        let mut pacer = CallPacer::new(self.options.call_interval);
        for shipment in candidates {
            if stop.is_stopped() {
                info!("🔄️ Stop requested. Ending reconciliation run early");
                break;
            }
            let outcome = if self.within_wait_window(&shipment, now) {
                debug!("🔄️ Order {} was dispatched recently. Not querying the carrier yet", shipment.order_id);
                Ok(ShipmentOutcome::Skipped)
            } else {
                pacer.ready().await;
                self.reconcile_shipment(&shipment).await
            };
            if let Err(e) = &outcome {
                warn!("🔄️ Could not reconcile shipment for order {}. {e}", shipment.order_id);
            }
            summary.record(&outcome);
        }
        info!("🔄️ Reconciliation run complete: {summary}");
        Ok(summary)
    }

    /// Queries the carrier about one shipment and writes back whatever changed.
    pub async fn reconcile_shipment(&self, shipment: &ShipmentRecord) -> Result<ShipmentOutcome, ReconcileError> {
        let code = shipment.integration_code().unwrap_or_default();
        let report = self.carrier.fetch_shipment_report(code).await?;
        trace!("🔄️ Carrier response for order {}: {}", shipment.order_id, report.raw_body);
        if !report.has_data() {
            return Err(ReconcileError::NoCarrierData(code.to_string()));
        }
        let vendor_text = report.vendor_status().map(String::from);
        // Without any status wording, the stored status stands.
        let new_status = vendor_text.as_deref().map(normalize).unwrap_or(shipment.canonical_status);
        let new_tracking = report.tracking_number.as_deref().map(str::trim).filter(|t| !t.is_empty());

        let status_changed = new_status != shipment.canonical_status;
        let tracking_assigned = !shipment.has_tracking_number() && new_tracking.is_some();
        if !status_changed && !tracking_assigned {
            debug!("🔄️ Order {} is unchanged at {new_status}", shipment.order_id);
            return Ok(ShipmentOutcome::Unchanged);
        }

        let tracking_number = new_tracking.filter(|_| tracking_assigned);
        let update = ShipmentUpdate {
            canonical_status: new_status,
            tracking_number: tracking_number.map(String::from),
            tracking_url: tracking_number.map(|t| self.options.tracking_url_template.render(t)),
            vendor_status_text: vendor_text,
            last_movement_at: report
                .latest_movement()
                .and_then(|m| m.timestamp())
                .and_then(|ts| self.options.carrier_utc_offset.from_local_datetime(&ts).single())
                .map(|ts| ts.with_timezone(&Utc)),
            fulfilled: new_status == CanonicalStatus::Delivered,
        };
        let record = self.db.apply_carrier_update(&shipment.order_id, shipment.version, update).await?;
        info!(
            "🔄️ Order {} updated: {} -> {new_status}{}",
            record.order_id,
            shipment.canonical_status,
            if tracking_assigned { ", tracking number assigned" } else { "" }
        );

        let delivered = status_changed && new_status == CanonicalStatus::Delivered;
        let notified = status_changed && new_status.is_notifiable() && self.notify(&record).await;
        Ok(ShipmentOutcome::Updated { status_changed, tracking_assigned, delivered, notified })
    }

    /// Sends a status notification. Failures are logged and otherwise ignored.
    async fn notify(&self, record: &ShipmentRecord) -> bool {
        let notification = ShipmentNotification {
            destination: self.options.notification_destination.clone(),
            order_id: record.order_id.clone(),
            tracking_number: record.tracking_number().map(String::from),
            tracking_url: record.tracking_url.clone(),
            status: record.canonical_status,
            vendor_status_text: record.vendor_status_text.clone(),
            occurred_at: record.last_movement_at.unwrap_or_else(Utc::now),
        };
        match self.dispatcher.send(notification).await {
            Ok(()) => {
                debug!("📬️ {} notification sent for order {}", record.canonical_status, record.order_id);
                true
            },
            Err(e) => {
                warn!("📬️ Could not send {} notification for order {}. {e}", record.canonical_status, record.order_id);
                false
            },
        }
    }
}
