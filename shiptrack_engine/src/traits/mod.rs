//! # Backend contracts
//!
//! The engine never talks to a database, the carrier or a notification channel directly. It goes through these
//! traits, so that backends can be swapped and the reconciliation logic can be exercised against fakes.
//!
//! * [`ShipmentManagement`] is the durable shipment store. It is shared with the rest of the storefront, so writes are
//!   targeted field updates guarded by an optimistic version check.
//! * [`CarrierGateway`] fetches the carrier's view of a shipment.
//! * [`NotificationDispatcher`] sends best-effort alerts about interesting status changes.
mod carrier_gateway;
mod notifications;
mod shipment_management;

pub use carrier_gateway::CarrierGateway;
pub use notifications::{NotificationDispatcher, NotificationError, ShipmentNotification};
pub use shipment_management::{ShipmentManagement, ShipmentStoreError};
