use std::time::Duration;

use actix_web::{http::StatusCode, web, web::ServiceConfig};
use carrier_tools::ShipmentReport;
use shiptrack_engine::{
    db_types::{CanonicalStatus, ShipmentRecord},
    ReconcileOptions,
    ReconciliationApi,
    ShipmentStoreError,
};

use super::{
    helpers::{bearer, cron_secret, get_request, post_request, shipment},
    mocks::{MockCarrier, MockDispatcher, MockShipmentStore},
};
use crate::{
    data_objects::ReconcileResponse,
    routes::{ReconcileManualRoute, ReconcileScheduledRoute},
};

fn configure_with(
    store: MockShipmentStore,
    carrier: MockCarrier,
    dispatcher: MockDispatcher,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let options = ReconcileOptions { call_interval: Duration::ZERO, ..Default::default() };
        let api = ReconciliationApi::new(store, carrier, dispatcher, options);
        cfg.service(ReconcileScheduledRoute::<MockShipmentStore, MockCarrier, MockDispatcher>::new())
            .service(ReconcileManualRoute::<MockShipmentStore, MockCarrier, MockDispatcher>::new())
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(cron_secret()));
    }
}

/// A store that must not be touched at all.
fn untouched_store() -> MockShipmentStore {
    let mut store = MockShipmentStore::new();
    store.expect_fetch_reconciliation_candidates().never();
    store.expect_apply_carrier_update().never();
    store
}

/// One out-for-delivery shipment that the carrier now reports as delivered.
fn delivering_backend() -> (MockShipmentStore, MockCarrier, MockDispatcher) {
    let mut store = MockShipmentStore::new();
    store
        .expect_fetch_reconciliation_candidates()
        .times(1)
        .returning(|_| Ok(vec![shipment("1001", Some("7001"), CanonicalStatus::OutForDelivery)]));
    store.expect_apply_carrier_update().times(1).returning(|_, version, update| {
        assert_eq!(version, 3);
        assert!(update.fulfilled);
        let mut record: ShipmentRecord = shipment("1001", Some("7001"), update.canonical_status);
        record.fulfilled = true;
        record.version = version + 1;
        Ok(record)
    });
    let mut carrier = MockCarrier::new();
    carrier.expect_fetch_shipment_report().times(1).returning(|_| {
        Ok(ShipmentReport { status_text: Some("Teslim edildi".into()), ..Default::default() })
    });
    let mut dispatcher = MockDispatcher::new();
    dispatcher.expect_send().times(1).returning(|_| Ok(()));
    (store, carrier, dispatcher)
}

#[actix_web::test]
async fn reconcile_without_token_is_refused() {
    let _ = env_logger::try_init().ok();
    let configure = configure_with(untouched_store(), MockCarrier::new(), MockDispatcher::new());
    let (status, body) = get_request("", "/cron/reconcile", configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Missing or invalid authorization token."}"#);
}

#[actix_web::test]
async fn reconcile_with_wrong_token_is_refused() {
    let _ = env_logger::try_init().ok();
    let configure = configure_with(untouched_store(), MockCarrier::new(), MockDispatcher::new());
    let (status, _) = post_request("Bearer nope", "/cron/reconcile", configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn scheduled_reconcile() {
    let _ = env_logger::try_init().ok();
    let (store, carrier, dispatcher) = delivering_backend();
    let (status, body) = get_request(&bearer(), "/cron/reconcile", configure_with(store, carrier, dispatcher)).await;
    assert_eq!(status, StatusCode::OK);
    let response: ReconcileResponse = serde_json::from_str(&body).unwrap();
    assert!(response.success);
    assert_eq!(response.results.queried, 1);
    assert_eq!(response.results.succeeded, 1);
    assert_eq!(response.results.updated, 1);
    assert_eq!(response.results.delivered, 1);
    assert_eq!(response.results.notified, 1);
}

#[actix_web::test]
async fn manual_reconcile_behaves_the_same() {
    let _ = env_logger::try_init().ok();
    let (store, carrier, dispatcher) = delivering_backend();
    let (status, body) = post_request(&bearer(), "/cron/reconcile", configure_with(store, carrier, dispatcher)).await;
    assert_eq!(status, StatusCode::OK);
    let response: ReconcileResponse = serde_json::from_str(&body).unwrap();
    assert!(response.success);
    assert_eq!(response.results.delivered, 1);
    assert!(response.message.starts_with("Reconciliation run complete."));
}

#[actix_web::test]
async fn reconcile_reports_store_failure() {
    let _ = env_logger::try_init().ok();
    let mut store = MockShipmentStore::new();
    store
        .expect_fetch_reconciliation_candidates()
        .returning(|_| Err(ShipmentStoreError::DatabaseError("database is locked".into())));
    let configure = configure_with(store, MockCarrier::new(), MockDispatcher::new());
    let (status, body) = get_request(&bearer(), "/cron/reconcile", configure).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("database is locked"), "{body}");
}
