use std::{env, str::FromStr, time::Duration};

use carrier_tools::CarrierConfig;
use chrono::{FixedOffset, Offset, Utc};
use log::*;
use shiptrack_common::Secret;
use shiptrack_engine::{
    helpers::TrackingUrlTemplate,
    ste_api::reconcile_objects::{DEFAULT_BATCH_SIZE, DEFAULT_CALL_INTERVAL, DEFAULT_WAIT_WINDOW_HOURS},
    ReconcileOptions,
};

const DEFAULT_STK_HOST: &str = "127.0.0.1";
const DEFAULT_STK_PORT: u16 = 8470;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The bearer token that schedulers and admin tools must present. If empty, every protected request is refused.
    pub cron_secret: Secret<String>,
    /// How often the built-in worker runs a reconciliation pass. `None` leaves it to an external scheduler.
    pub reconcile_interval: Option<Duration>,
    pub reconcile: ReconcileOptions,
    /// Where notifications are POSTed. `None` means they are only logged.
    pub notification_webhook: Option<String>,
    pub carrier: CarrierConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_STK_HOST.to_string(),
            port: DEFAULT_STK_PORT,
            database_url: String::default(),
            cron_secret: Secret::default(),
            reconcile_interval: None,
            reconcile: ReconcileOptions::default(),
            notification_webhook: None,
            carrier: CarrierConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("STK_HOST").ok().unwrap_or_else(|| DEFAULT_STK_HOST.into());
        let port = parse_env("STK_PORT", DEFAULT_STK_PORT);
        let database_url = env::var("STK_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ STK_DATABASE_URL is not set. Please set it to the URL for the shipment database.");
            String::default()
        });
        let cron_secret = Secret::new(env::var("STK_CRON_SECRET").ok().unwrap_or_else(|| {
            error!("🪛️ STK_CRON_SECRET is not set. All reconciliation trigger requests will be refused.");
            String::default()
        }));
        let reconcile_interval = match parse_env::<u64>("STK_RECONCILE_INTERVAL_MINS", 0) {
            0 => {
                info!("🪛️ Built-in reconciliation scheduler is disabled. Runs must be triggered externally.");
                None
            },
            mins => Some(Duration::from_secs(mins * 60)),
        };
        let reconcile = reconcile_options_from_env();
        let notification_webhook = env::var("STK_NOTIFY_WEBHOOK_URL").ok().filter(|s| !s.trim().is_empty());
        if notification_webhook.is_none() {
            info!("🪛️ STK_NOTIFY_WEBHOOK_URL is not set. Shipment notifications will only be logged.");
        }
        let carrier = CarrierConfig::new_from_env_or_default();
        Self { host, port, database_url, cron_secret, reconcile_interval, reconcile, notification_webhook, carrier }
    }
}

fn reconcile_options_from_env() -> ReconcileOptions {
    let batch_size = match parse_env("STK_BATCH_SIZE", DEFAULT_BATCH_SIZE) {
        n if n > 0 => n,
        n => {
            warn!("🪛️ STK_BATCH_SIZE must be positive, but was {n}. Using {DEFAULT_BATCH_SIZE} instead.");
            DEFAULT_BATCH_SIZE
        },
    };
    let wait_window = chrono::Duration::hours(parse_env("STK_WAIT_WINDOW_HOURS", DEFAULT_WAIT_WINDOW_HOURS));
    let call_interval = Duration::from_millis(parse_env(
        "STK_CARRIER_CALL_INTERVAL_MS",
        DEFAULT_CALL_INTERVAL.as_millis() as u64,
    ));
    let tracking_url_template = env::var("STK_TRACKING_URL_TEMPLATE")
        .ok()
        .map(TrackingUrlTemplate::from)
        .unwrap_or_else(|| {
            let template = TrackingUrlTemplate::default();
            warn!("🪛️ STK_TRACKING_URL_TEMPLATE is not set. Using {template}");
            template
        });
    let notification_destination = env::var("STK_NOTIFY_DESTINATION").ok().unwrap_or_default();
    let offset_mins = parse_env("STK_CARRIER_UTC_OFFSET_MINS", 0i32);
    let carrier_utc_offset = utc_offset_from_minutes(offset_mins).unwrap_or_else(|| {
        warn!("🪛️ STK_CARRIER_UTC_OFFSET_MINS is out of range ({offset_mins}). Assuming the carrier reports UTC.");
        Utc.fix()
    });
    ReconcileOptions {
        batch_size,
        wait_window,
        call_interval,
        tracking_url_template,
        notification_destination,
        carrier_utc_offset,
    }
}

fn utc_offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

/// Reads and parses an environment variable, falling back to `default` (with a log entry) if it is missing or invalid.
fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => {
            debug!("🪛️ {name} is not set. Using the default, {default}.");
            default
        },
    }
}
