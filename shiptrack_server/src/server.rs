use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use carrier_tools::CarrierApi;
use log::*;
use shiptrack_engine::{events::ChannelDispatcher, ReconciliationApi, ShipmentApi, SqliteDatabase, StopSignal};

use crate::{
    config::ServerConfig,
    data_objects::CronSecret,
    errors::ServerError,
    integrations::notifications::create_notification_handler,
    reconcile_worker::start_reconcile_worker,
    routes::{health, ReceiverDetailsRoute, ReconcileManualRoute, ReconcileScheduledRoute, ShipmentStatusRoute},
};

const NOTIFICATION_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let carrier = CarrierApi::new(config.carrier.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let notifications = create_notification_handler(config.notification_webhook.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let dispatcher = ChannelDispatcher::new(notifications.subscribe());
    let notification_task = tokio::spawn(notifications.start_handler());

    let stop = StopSignal::default();
    let worker = config.reconcile_interval.map(|interval| {
        let api = ReconciliationApi::new(db.clone(), carrier.clone(), dispatcher.clone(), config.reconcile.clone());
        start_reconcile_worker(api, interval, stop.clone())
    });

    let srv = create_server_instance(config, db.clone(), carrier, dispatcher)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));

    info!("🚀️ Server stopped. Waiting for background tasks to wind down");
    stop.stop();
    if let Some(worker) = worker {
        if let Err(e) = worker.await {
            warn!("🕰️ Reconciliation worker did not shut down cleanly. {e}");
        }
    }
    // The handler exits once every dispatcher (and so every producer) has been dropped
    match tokio::time::timeout(NOTIFICATION_SHUTDOWN_GRACE, notification_task).await {
        Ok(Ok(())) => debug!("📬️ Notification handler has shut down"),
        Ok(Err(e)) => warn!("📬️ Notification handler did not shut down cleanly. {e}"),
        Err(_) => warn!("📬️ Notification handler is still busy. Pending notifications may be lost"),
    }
    db.close().await;
    result
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    carrier: CarrierApi,
    dispatcher: ChannelDispatcher,
) -> Result<Server, ServerError> {
    let secret = CronSecret(config.cron_secret.clone());
    let options = config.reconcile.clone();
    let srv = HttpServer::new(move || {
        let reconciliation_api =
            ReconciliationApi::new(db.clone(), carrier.clone(), dispatcher.clone(), options.clone());
        let shipment_api = ShipmentApi::new(db.clone(), carrier.clone());
        let api_scope = web::scope("/api")
            .service(ShipmentStatusRoute::<SqliteDatabase, CarrierApi>::new())
            .service(ReceiverDetailsRoute::<SqliteDatabase, CarrierApi>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("stk::access_log"))
            .app_data(web::Data::new(reconciliation_api))
            .app_data(web::Data::new(shipment_api))
            .app_data(web::Data::new(secret.clone()))
            .service(health)
            .service(ReconcileScheduledRoute::<SqliteDatabase, CarrierApi, ChannelDispatcher>::new())
            .service(ReconcileManualRoute::<SqliteDatabase, CarrierApi, ChannelDispatcher>::new())
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
