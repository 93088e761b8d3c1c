use carrier_tools::{CarrierApi, CarrierApiError, ReceiverDetails, ShipmentReport};

/// The carrier as seen by the engine.
#[allow(async_fn_in_trait)]
pub trait CarrierGateway {
    async fn fetch_shipment_report(&self, integration_code: &str) -> Result<ShipmentReport, CarrierApiError>;

    async fn fetch_receiver_details(&self, integration_code: &str) -> Result<ReceiverDetails, CarrierApiError>;
}

impl CarrierGateway for CarrierApi {
    async fn fetch_shipment_report(&self, integration_code: &str) -> Result<ShipmentReport, CarrierApiError> {
        self.query_shipment(integration_code).await
    }

    async fn fetch_receiver_details(&self, integration_code: &str) -> Result<ReceiverDetails, CarrierApiError> {
        self.query_receiver(integration_code).await
    }
}
