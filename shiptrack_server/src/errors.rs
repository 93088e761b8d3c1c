use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use carrier_tools::CarrierApiError;
use shiptrack_engine::{ReconcileError, ShipmentApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Missing or invalid authorization token.")]
    Unauthorized,
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The carrier did not answer in time. {0}")]
    CarrierTimeout(String),
    #[error("The carrier request failed. {0}")]
    CarrierError(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::CarrierTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::CarrierError(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) |
            Self::BackendError(_) |
            Self::IOError(_) |
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<CarrierApiError> for ServerError {
    fn from(e: CarrierApiError) -> Self {
        if e.is_timeout() {
            Self::CarrierTimeout(e.to_string())
        } else {
            Self::CarrierError(e.to_string())
        }
    }
}

impl From<ShipmentApiError> for ServerError {
    fn from(e: ShipmentApiError) -> Self {
        match e {
            ShipmentApiError::NotFound(_) | ShipmentApiError::NotRegistered(_) => Self::NoRecordFound(e.to_string()),
            ShipmentApiError::Store(e) => Self::BackendError(e.to_string()),
            ShipmentApiError::Carrier(e) => e.into(),
        }
    }
}

impl From<ReconcileError> for ServerError {
    fn from(e: ReconcileError) -> Self {
        Self::BackendError(format!("Reconciliation run could not start. {e}"))
    }
}
