use std::time::Duration;

use actix_web::{http::StatusCode, web, web::ServiceConfig};
use carrier_tools::{CarrierApiError, ReceiverDetails};
use shiptrack_engine::{db_types::CanonicalStatus, ShipmentApi};

use super::{
    helpers::{bearer, cron_secret, get_request, shipment},
    mocks::{MockCarrier, MockShipmentStore},
};
use crate::routes::{ReceiverDetailsRoute, ShipmentStatusRoute};

fn configure_with(store: MockShipmentStore, carrier: MockCarrier) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let api = ShipmentApi::new(store, carrier);
        cfg.service(
            web::scope("/api")
                .service(ShipmentStatusRoute::<MockShipmentStore, MockCarrier>::new())
                .service(ReceiverDetailsRoute::<MockShipmentStore, MockCarrier>::new()),
        )
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(cron_secret()));
    }
}

fn store_with_1001() -> MockShipmentStore {
    let mut store = MockShipmentStore::new();
    store.expect_fetch_shipment().returning(|oid| {
        Ok((oid.as_str() == "1001").then(|| shipment("1001", Some("7001"), CanonicalStatus::InTransit)))
    });
    store
}

#[actix_web::test]
async fn shipment_status_includes_estimate() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        get_request(&bearer(), "/api/shipments/1001", configure_with(store_with_1001(), MockCarrier::new())).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["shipment"]["order_id"], "1001");
    assert_eq!(json["shipment"]["tracking_number"], "7001");
    assert_eq!(json["shipment"]["canonical_status"], "IN_TRANSIT");
    assert!(json["estimated_delivery"].is_string());
}

#[actix_web::test]
async fn shipment_status_requires_token() {
    let _ = env_logger::try_init().ok();
    let mut store = MockShipmentStore::new();
    store.expect_fetch_shipment().never();
    let (status, _) = get_request("", "/api/shipments/1001", configure_with(store, MockCarrier::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn unknown_shipment_is_not_found() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        get_request(&bearer(), "/api/shipments/2002", configure_with(store_with_1001(), MockCarrier::new())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No shipment exists for order #2002"), "{body}");
}

#[actix_web::test]
async fn receiver_details_come_from_the_carrier() {
    let _ = env_logger::try_init().ok();
    let mut carrier = MockCarrier::new();
    carrier.expect_fetch_receiver_details().times(1).returning(|code| {
        assert_eq!(code, "INT-1001");
        Ok(ReceiverDetails {
            name: Some("Ayşe Yılmaz".into()),
            city: Some("İzmir".into()),
            district: Some("Konak".into()),
            ..Default::default()
        })
    });
    let (status, body) =
        get_request(&bearer(), "/api/shipments/1001/receiver", configure_with(store_with_1001(), carrier)).await;
    assert_eq!(status, StatusCode::OK);
    let details: ReceiverDetails = serde_json::from_str(&body).unwrap();
    assert_eq!(details.name.as_deref(), Some("Ayşe Yılmaz"));
    assert_eq!(details.city.as_deref(), Some("İzmir"));
    assert!(details.phone.is_none());
}

#[actix_web::test]
async fn carrier_timeout_is_a_gateway_timeout() {
    let _ = env_logger::try_init().ok();
    let mut carrier = MockCarrier::new();
    carrier
        .expect_fetch_receiver_details()
        .returning(|_| Err(CarrierApiError::Timeout(Duration::from_secs(15))));
    let (status, _) =
        get_request(&bearer(), "/api/shipments/1001/receiver", configure_with(store_with_1001(), carrier)).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}
