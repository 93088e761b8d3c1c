//! Shipment tracking engine
//!
//! This library keeps locally stored shipment state in sync with the cargo carrier's system of record. It is
//! backend-agnostic: storage, the carrier and the notification channel are all reached through traits.
//!
//! The library is divided into these sections:
//! 1. Storage ([`mod@sqlite`]). SQLite is the supported backend. You should never need to access the database
//!    directly. Use the public API instead. The data types stored in the database are defined in [`mod@db_types`].
//! 2. The backend contracts ([`mod@traits`]): [`ShipmentManagement`] for the store, [`CarrierGateway`] for the
//!    carrier and [`NotificationDispatcher`] for outbound alerts.
//! 3. The public API ([`mod@ste_api`]). [`ReconciliationApi`] runs reconciliation passes, [`ShipmentApi`] answers
//!    read queries about individual shipments.
//!
//! Notifications can be delivered asynchronously through the [`mod@events`] channel, so that a slow notification
//! target never holds up a reconciliation run.
pub mod db_types;
pub mod events;
pub mod helpers;
pub mod ste_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use ste_api::{
    errors::{ReconcileError, ShipmentApiError},
    reconcile_objects::{ReconcileOptions, ReconciliationRunSummary, ShipmentOutcome, StopSignal},
    reconciliation_api::ReconciliationApi,
    shipment_api::{ShipmentApi, ShipmentStatusView},
};
pub use traits::{
    CarrierGateway,
    NotificationDispatcher,
    NotificationError,
    ShipmentManagement,
    ShipmentNotification,
    ShipmentStoreError,
};
