use carrier_tools::CarrierApiError;
use thiserror::Error;

use crate::{db_types::OrderId, traits::ShipmentStoreError};

/// Why a single shipment could not be reconciled. None of these abort a run, except a failure to fetch the candidate
/// list in the first place.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    #[error("Carrier query failed. {0}")]
    Carrier(#[from] CarrierApiError),
    #[error("The carrier has no usable data for integration code {0} yet")]
    NoCarrierData(String),
    #[error("Could not persist shipment state. {0}")]
    Persistence(#[from] ShipmentStoreError),
}

#[derive(Debug, Clone, Error)]
pub enum ShipmentApiError {
    #[error("No shipment exists for order {0}")]
    NotFound(OrderId),
    #[error("Shipment for order {0} has not been registered with the carrier")]
    NotRegistered(OrderId),
    #[error(transparent)]
    Store(#[from] ShipmentStoreError),
    #[error(transparent)]
    Carrier(#[from] CarrierApiError),
}
