//! Request handler definitions
//!
//! Define each route and its handler here. Handlers are thin adapters: they authorise the request, call into the
//! engine API and serialise the result. Anything longer than a few lines belongs in the engine.
//!
//! Since each worker thread processes its requests sequentially, handlers must never block the current thread. A
//! reconciliation run spends most of its time waiting on the carrier, and it does so asynchronously, so other requests
//! on the same worker keep being served while a run is in progress.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use shiptrack_engine::{
    db_types::OrderId,
    CarrierGateway,
    NotificationDispatcher,
    ReconciliationApi,
    ShipmentApi,
    ShipmentManagement,
};

use crate::{
    data_objects::{CronSecret, ReconcileResponse},
    errors::ServerError,
    helpers::check_bearer_token,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Reconciliation  -------------------------------------------------
route!(reconcile_scheduled => Get "/cron/reconcile" impl ShipmentManagement, CarrierGateway, NotificationDispatcher);
/// The entry point for external schedulers. Identical to [`reconcile_manual`].
pub async fn reconcile_scheduled<B, C, N>(
    req: HttpRequest,
    secret: web::Data<CronSecret>,
    api: web::Data<ReconciliationApi<B, C, N>>,
) -> Result<HttpResponse, ServerError>
where
    B: ShipmentManagement,
    C: CarrierGateway,
    N: NotificationDispatcher,
{
    trace!("💻️ Received scheduled reconciliation request");
    run_reconciliation(&req, &secret, &api).await
}

route!(reconcile_manual => Post "/cron/reconcile" impl ShipmentManagement, CarrierGateway, NotificationDispatcher);
/// The entry point for admin tools that want to kick off a run by hand.
pub async fn reconcile_manual<B, C, N>(
    req: HttpRequest,
    secret: web::Data<CronSecret>,
    api: web::Data<ReconciliationApi<B, C, N>>,
) -> Result<HttpResponse, ServerError>
where
    B: ShipmentManagement,
    C: CarrierGateway,
    N: NotificationDispatcher,
{
    trace!("💻️ Received manual reconciliation request");
    run_reconciliation(&req, &secret, &api).await
}

async fn run_reconciliation<B, C, N>(
    req: &HttpRequest,
    secret: &CronSecret,
    api: &ReconciliationApi<B, C, N>,
) -> Result<HttpResponse, ServerError>
where
    B: ShipmentManagement,
    C: CarrierGateway,
    N: NotificationDispatcher,
{
    check_bearer_token(req, secret)?;
    let summary = api.reconcile().await?;
    debug!("💻️ Reconciliation request complete. {summary}");
    Ok(HttpResponse::Ok().json(ReconcileResponse::completed(summary)))
}

//----------------------------------------------   Shipments  ----------------------------------------------------
route!(shipment_status => Get "/shipments/{order_id}" impl ShipmentManagement, CarrierGateway);
pub async fn shipment_status<B, C>(
    req: HttpRequest,
    path: web::Path<String>,
    secret: web::Data<CronSecret>,
    api: web::Data<ShipmentApi<B, C>>,
) -> Result<HttpResponse, ServerError>
where
    B: ShipmentManagement,
    C: CarrierGateway,
{
    check_bearer_token(&req, &secret)?;
    let order_id = OrderId::from(path.into_inner());
    trace!("💻️ Received shipment status request for order {order_id}");
    let view = api.shipment_status(&order_id).await?;
    Ok(HttpResponse::Ok().json(view))
}

route!(receiver_details => Get "/shipments/{order_id}/receiver" impl ShipmentManagement, CarrierGateway);
pub async fn receiver_details<B, C>(
    req: HttpRequest,
    path: web::Path<String>,
    secret: web::Data<CronSecret>,
    api: web::Data<ShipmentApi<B, C>>,
) -> Result<HttpResponse, ServerError>
where
    B: ShipmentManagement,
    C: CarrierGateway,
{
    check_bearer_token(&req, &secret)?;
    let order_id = OrderId::from(path.into_inner());
    trace!("💻️ Received receiver details request for order {order_id}");
    let details = api.receiver_details(&order_id).await?;
    Ok(HttpResponse::Ok().json(details))
}
