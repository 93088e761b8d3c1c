use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CarrierApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("The carrier did not respond within {0:?}")]
    Timeout(Duration),
    #[error("The carrier responded with HTTP {status}. {body}")]
    Transport { status: u16, body: String },
    #[error("The carrier returned a SOAP fault: {0}")]
    ProtocolFault(String),
    #[error("Could not reach the carrier: {0}")]
    Network(String),
    #[error("Could not read the carrier response: {0}")]
    ResponseError(String),
}

impl CarrierApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
