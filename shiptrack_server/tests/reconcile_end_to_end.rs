//! Runs a full reconciliation pass against a real SQLite store, the real carrier wire client (talking to a mock
//! carrier) and the notification channel.
use std::{
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use carrier_tools::{CarrierApi, CarrierConfig};
use chrono::{Duration, Utc};
use futures::future::BoxFuture;
use shiptrack_common::Secret;
use shiptrack_engine::{
    db_types::{CanonicalStatus, NewShipment, OrderId},
    events::{ChannelDispatcher, EventHandler, Handler},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    ReconcileOptions,
    ReconciliationApi,
    ShipmentManagement,
    ShipmentNotification,
    SqliteDatabase,
};
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock,
    MockServer,
    ResponseTemplate,
};

const DELIVERED_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body>
  <QueryShipmentResponse xmlns="http://tempuri.org/"><QueryShipmentResult>
    <KargoTakipNo>445566</KargoTakipNo>
    <Hareket><IslemTarihi>03.04.2024</IslemTarihi><IslemSaati>14:40</IslemSaati><Birim>Izmir</Birim>
      <Aciklama>Teslim edildi</Aciklama></Hareket>
    <Hareket><IslemTarihi>03.04.2024</IslemTarihi><IslemSaati>09:05</IslemSaati><Birim>Izmir</Birim>
      <Aciklama>Kurye dagitimda</Aciklama></Hareket>
  </QueryShipmentResult></QueryShipmentResponse>
</soap:Body></soap:Envelope>"#;

async fn mock_carrier() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ShipmentTracking.asmx"))
        .and(body_string_contains("<integrationCode>INT-2001</integrationCode>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DELIVERED_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn carrier_for(server: &MockServer) -> CarrierApi {
    let config = CarrierConfig {
        service_url: format!("{}/ShipmentTracking.asmx", server.uri()),
        username: "shop".into(),
        password: Secret::new("secret".into()),
        customer_code: "C-1".into(),
        timeout: StdDuration::from_secs(5),
        ..Default::default()
    };
    CarrierApi::new(config).expect("carrier client")
}

#[tokio::test]
async fn delivered_shipment_is_stored_and_announced() {
    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("database");
    let order_id = OrderId::from("2001");
    db.insert_shipment(NewShipment::new(order_id.clone(), "INT-2001", Utc::now() - Duration::hours(30)))
        .await
        .expect("insert");
    // Still inside the wait-window, so the carrier never hears about it.
    db.insert_shipment(NewShipment::new(OrderId::from("2002"), "INT-2002", Utc::now() - Duration::hours(2)))
        .await
        .expect("insert");

    let server = mock_carrier().await;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let handler: Handler<ShipmentNotification> = Arc::new(move |n: ShipmentNotification| -> BoxFuture<'static, ()> {
        let sink = sink.clone();
        Box::pin(async move {
            sink.lock().unwrap().push(n);
        })
    });
    let event_handler = EventHandler::new(8, handler);
    let dispatcher = ChannelDispatcher::new(event_handler.subscribe());
    let options = ReconcileOptions {
        call_interval: StdDuration::from_millis(1),
        notification_destination: "ops@example.com".into(),
        ..Default::default()
    };
    let api = ReconciliationApi::new(db.clone(), carrier_for(&server), dispatcher, options);

    let summary = api.reconcile().await.expect("run");
    assert_eq!(summary.queried, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.delivered, 1);
    assert_eq!(summary.notified, 1);

    let stored = db.fetch_shipment(&order_id).await.expect("fetch").expect("shipment exists");
    assert_eq!(stored.canonical_status, CanonicalStatus::Delivered);
    assert_eq!(stored.tracking_number(), Some("445566"));
    assert_eq!(stored.tracking_url.as_deref(), Some("https://kargotakip.example.com/track?code=445566"));
    assert_eq!(stored.vendor_status_text.as_deref(), Some("Teslim edildi"));
    assert!(stored.fulfilled);
    assert_eq!(stored.version, 1);

    // Delivered and tracked shipments drop out of the candidate set, so a second run leaves the carrier alone.
    let again = api.reconcile().await.expect("second run");
    assert_eq!(again.queried, 0);

    drop(api);
    event_handler.start_handler().await;
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].order_id, order_id);
    assert_eq!(seen[0].destination, "ops@example.com");
    assert_eq!(seen[0].status, CanonicalStatus::Delivered);
    assert_eq!(seen[0].tracking_number.as_deref(), Some("445566"));
    db.close().await;
}
