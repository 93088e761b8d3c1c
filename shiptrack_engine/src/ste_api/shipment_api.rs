use std::fmt::Debug;

use carrier_tools::ReceiverDetails;
use chrono::{DateTime, Utc};
use log::*;
use serde::{Deserialize, Serialize};

use super::errors::ShipmentApiError;
use crate::{
    db_types::{OrderId, ShipmentRecord},
    helpers::estimate_delivery,
    traits::{CarrierGateway, ShipmentManagement},
};

/// A stored shipment, together with a delivery estimate for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentStatusView {
    pub shipment: ShipmentRecord,
    pub estimated_delivery: Option<DateTime<Utc>>,
}

/// `ShipmentApi` answers questions about individual shipments. It never writes to the store.
pub struct ShipmentApi<B, C> {
    db: B,
    carrier: C,
}

impl<B, C> Debug for ShipmentApi<B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShipmentApi")
    }
}

impl<B, C> ShipmentApi<B, C> {
    pub fn new(db: B, carrier: C) -> Self {
        Self { db, carrier }
    }
}

impl<B, C> ShipmentApi<B, C>
where
    B: ShipmentManagement,
    C: CarrierGateway,
{
    async fn fetch(&self, order_id: &OrderId) -> Result<ShipmentRecord, ShipmentApiError> {
        self.db.fetch_shipment(order_id).await?.ok_or_else(|| ShipmentApiError::NotFound(order_id.clone()))
    }

    /// The stored state of the shipment for `order_id`, plus an estimated delivery time.
    ///
    /// The estimate is measured from the last movement seen, or from dispatch if there has been none.
    pub async fn shipment_status(&self, order_id: &OrderId) -> Result<ShipmentStatusView, ShipmentApiError> {
        let shipment = self.fetch(order_id).await?;
        let reference = shipment.last_movement_at.unwrap_or(shipment.dispatched_at);
        let estimated_delivery = estimate_delivery(shipment.canonical_status, reference, Utc::now());
        Ok(ShipmentStatusView { shipment, estimated_delivery })
    }

    /// Asks the carrier who the shipment for `order_id` is addressed to.
    pub async fn receiver_details(&self, order_id: &OrderId) -> Result<ReceiverDetails, ShipmentApiError> {
        let shipment = self.fetch(order_id).await?;
        let code = shipment.integration_code().ok_or_else(|| ShipmentApiError::NotRegistered(order_id.clone()))?;
        let details = self.carrier.fetch_receiver_details(code).await?;
        if details.is_empty() {
            debug!("🔄️ Carrier returned no receiver details for order {order_id}");
        }
        Ok(details)
    }
}
