use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};

use crate::{
    config::CarrierConfig,
    envelope::{build_envelope, extract_fault},
    parser,
    CarrierApiError,
    CarrierOperation,
    ReceiverDetails,
    ShipmentReport,
};

#[derive(Clone)]
pub struct CarrierApi {
    config: CarrierConfig,
    client: Arc<Client>,
}

impl CarrierApi {
    pub fn new(config: CarrierConfig) -> Result<Self, CarrierApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml; charset=utf-8"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CarrierApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    /// Performs a single call against the carrier and returns the raw response body.
    ///
    /// The outcome is classified as follows:
    /// * no response within the configured timeout: [`CarrierApiError::Timeout`],
    /// * a SOAP fault in the body, whatever the status (SOAP 1.1 faults usually come with HTTP 500):
    ///   [`CarrierApiError::ProtocolFault`] with the fault string,
    /// * any other non-2xx status: [`CarrierApiError::Transport`] with the status and body.
    ///
    /// There are no retries here. Callers decide when to try again.
    pub async fn query(&self, op: CarrierOperation, params: &[(&str, &str)]) -> Result<String, CarrierApiError> {
        let envelope = build_envelope(op, &self.config, params);
        trace!("🚚️ Sending {op} to {}", self.config.service_url);
        let response = self
            .client
            .post(&self.config.service_url)
            .header("SOAPAction", op.soap_action(&self.config.namespace))
            .body(envelope)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| match self.classify(e) {
            CarrierApiError::Network(e) => CarrierApiError::ResponseError(e),
            e => e,
        })?;
        if let Some(fault) = extract_fault(&body) {
            debug!("🚚️ {op} returned a SOAP fault with HTTP {status}: {fault}");
            return Err(CarrierApiError::ProtocolFault(fault));
        }
        if !status.is_success() {
            debug!("🚚️ {op} failed with HTTP {status}");
            return Err(CarrierApiError::Transport { status: status.as_u16(), body });
        }
        trace!("🚚️ {op} succeeded. {} bytes received", body.len());
        Ok(body)
    }

    /// Fetches status, tracking number and movement history for the shipment registered under `integration_code`.
    pub async fn query_shipment(&self, integration_code: &str) -> Result<ShipmentReport, CarrierApiError> {
        debug!("🚚️ Querying shipment {integration_code}");
        let body = self.query(CarrierOperation::QueryShipment, &[("integrationCode", integration_code)]).await?;
        let report = parser::extract_report(&body);
        trace!(
            "🚚️ Shipment {integration_code}: tracking number {:?}, status {:?}, {} movements",
            report.tracking_number,
            report.vendor_status(),
            report.movements.len()
        );
        Ok(report)
    }

    pub async fn query_receiver(&self, integration_code: &str) -> Result<ReceiverDetails, CarrierApiError> {
        debug!("🚚️ Querying receiver details for {integration_code}");
        let body = self.query(CarrierOperation::QueryReceiver, &[("integrationCode", integration_code)]).await?;
        Ok(parser::extract_receiver(&body))
    }

    fn classify(&self, e: reqwest::Error) -> CarrierApiError {
        if e.is_timeout() {
            warn!("🚚️ Carrier call timed out after {:?}", self.config.timeout);
            CarrierApiError::Timeout(self.config.timeout)
        } else {
            CarrierApiError::Network(e.to_string())
        }
    }
}
