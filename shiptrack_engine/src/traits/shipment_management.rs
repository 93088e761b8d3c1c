use thiserror::Error;

use crate::db_types::{NewShipment, OrderId, ShipmentRecord, ShipmentUpdate};

#[derive(Debug, Clone, Error)]
pub enum ShipmentStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Shipment for order {0} not found")]
    ShipmentNotFound(OrderId),
    #[error("Shipment for order {0} already exists")]
    AlreadyExists(OrderId),
    #[error("Shipment for order {0} was modified by someone else in the meantime")]
    VersionConflict(OrderId),
}

impl From<sqlx::Error> for ShipmentStoreError {
    fn from(e: sqlx::Error) -> Self {
        ShipmentStoreError::DatabaseError(e.to_string())
    }
}

/// The `ShipmentManagement` trait defines the behaviour the engine needs from the shipment store.
#[allow(async_fn_in_trait)]
pub trait ShipmentManagement {
    /// Records a newly registered shipment with status `CREATED` and no tracking number.
    async fn insert_shipment(&self, shipment: NewShipment) -> Result<ShipmentRecord, ShipmentStoreError>;

    async fn fetch_shipment(&self, order_id: &OrderId) -> Result<Option<ShipmentRecord>, ShipmentStoreError>;

    /// Returns at most `limit` shipments that have an integration code and either lack a tracking number or are not
    /// yet in a terminal status. Shipments without a tracking number come first, then the oldest dispatches.
    async fn fetch_reconciliation_candidates(&self, limit: i64) -> Result<Vec<ShipmentRecord>, ShipmentStoreError>;

    /// Atomically applies `update`, provided the stored record is still at `expected_version`.
    ///
    /// Returns [`ShipmentStoreError::VersionConflict`] if the record changed since it was read, in which case nothing
    /// is written. A stored tracking number is never replaced.
    async fn apply_carrier_update(
        &self,
        order_id: &OrderId,
        expected_version: i64,
        update: ShipmentUpdate,
    ) -> Result<ShipmentRecord, ShipmentStoreError>;
}
