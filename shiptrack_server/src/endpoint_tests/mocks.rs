use carrier_tools::{CarrierApiError, ReceiverDetails, ShipmentReport};
use mockall::mock;
use shiptrack_engine::{
    db_types::{NewShipment, OrderId, ShipmentRecord, ShipmentUpdate},
    CarrierGateway,
    NotificationDispatcher,
    NotificationError,
    ShipmentManagement,
    ShipmentNotification,
    ShipmentStoreError,
};

mock! {
    pub ShipmentStore {}
    impl ShipmentManagement for ShipmentStore {
        async fn insert_shipment(&self, shipment: NewShipment) -> Result<ShipmentRecord, ShipmentStoreError>;
        async fn fetch_shipment(&self, order_id: &OrderId) -> Result<Option<ShipmentRecord>, ShipmentStoreError>;
        async fn fetch_reconciliation_candidates(&self, limit: i64) -> Result<Vec<ShipmentRecord>, ShipmentStoreError>;
        async fn apply_carrier_update(&self, order_id: &OrderId, expected_version: i64, update: ShipmentUpdate) -> Result<ShipmentRecord, ShipmentStoreError>;
    }
}

mock! {
    pub Carrier {}
    impl CarrierGateway for Carrier {
        async fn fetch_shipment_report(&self, integration_code: &str) -> Result<ShipmentReport, CarrierApiError>;
        async fn fetch_receiver_details(&self, integration_code: &str) -> Result<ReceiverDetails, CarrierApiError>;
    }
}

mock! {
    pub Dispatcher {}
    impl NotificationDispatcher for Dispatcher {
        async fn send(&self, notification: ShipmentNotification) -> Result<(), NotificationError>;
    }
}
