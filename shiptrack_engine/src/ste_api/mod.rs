//! # Shipment tracking engine API
//!
//! [`reconciliation_api::ReconciliationApi`] brings stored shipments up to date with the carrier.
//! [`shipment_api::ShipmentApi`] answers read queries about a single shipment.
//!
//! Both are generic over the store and the carrier, so that the server can wire in the real backends and tests can
//! use fakes.
pub mod errors;
pub mod rate_limit;
pub mod reconcile_objects;
pub mod reconciliation_api;
pub mod shipment_api;
