//! Client for the cargo carrier's legacy SOAP tracking service.
//!
//! * [`CarrierApi`] builds the request envelopes, talks to the carrier and classifies the outcome of every call.
//! * [`parser`] turns the loosely specified XML responses into structured data. The carrier's deployments disagree on
//!   tag names, so every extraction walks an ordered list of [`Dialect`]s and takes the first that matches.
mod api;
mod config;
mod data_objects;
mod envelope;
mod error;
mod operations;

pub mod parser;

pub use api::CarrierApi;
pub use config::CarrierConfig;
pub use data_objects::{ReceiverDetails, ShipmentReport};
pub use envelope::{build_envelope, extract_fault};
pub use error::CarrierApiError;
pub use operations::CarrierOperation;
pub use parser::Dialect;
