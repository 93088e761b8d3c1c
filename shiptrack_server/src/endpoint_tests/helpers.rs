use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use chrono::{TimeZone, Utc};
use log::debug;
use shiptrack_common::Secret;
use shiptrack_engine::db_types::{CanonicalStatus, OrderId, ShipmentRecord};

use crate::data_objects::CronSecret;

pub const TEST_SECRET: &str = "correct-horse-battery-staple";

pub fn cron_secret() -> CronSecret {
    CronSecret(Secret::new(TEST_SECRET.to_string()))
}

pub fn bearer() -> String {
    format!("Bearer {TEST_SECRET}")
}

pub async fn get_request<F>(auth_header: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    send_request(TestRequest::get(), auth_header, path, configure).await
}

pub async fn post_request<F>(auth_header: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    send_request(TestRequest::post(), auth_header, path, configure).await
}

async fn send_request<F>(req: TestRequest, auth_header: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let mut req = req.uri(path);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", auth_header));
    }
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request to {path}");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub fn shipment(order_id: &str, tracking: Option<&str>, status: CanonicalStatus) -> ShipmentRecord {
    let ts = Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();
    ShipmentRecord {
        id: 1,
        order_id: OrderId::from(order_id),
        integration_code: Some(format!("INT-{order_id}")),
        tracking_number: tracking.map(String::from),
        canonical_status: status,
        vendor_status_text: None,
        last_movement_at: None,
        dispatched_at: ts,
        tracking_url: None,
        fulfilled: false,
        version: 3,
        created_at: ts,
        updated_at: ts,
    }
}
