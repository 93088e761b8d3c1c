//! # Shipment tracking server
//!
//! This crate hosts the HTTP side of carrier shipment reconciliation. It is responsible for:
//! * Accepting reconciliation triggers from an external scheduler (and from admin tools).
//! * Optionally running reconciliation on its own schedule.
//! * Delivering the shipment notifications that reconciliation produces.
//! * Answering read queries about individual shipments.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `/health`: A health check route that returns a 200 OK response.
//! * `GET|POST /cron/reconcile`: Runs a reconciliation pass and returns its summary. Requires the bearer secret.
//! * `GET /api/shipments/{order_id}`: The stored shipment with an estimated delivery time. Requires the bearer secret.
//! * `GET /api/shipments/{order_id}/receiver`: The receiver details the carrier holds for the shipment. Requires the
//!   bearer secret.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod reconcile_worker;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
