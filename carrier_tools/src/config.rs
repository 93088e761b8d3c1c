use std::time::Duration;

use log::*;
use shiptrack_common::Secret;

pub const DEFAULT_CARRIER_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_CARRIER_URL: &str = "https://ws.example-carrier.com/ShipmentTracking.asmx";
const DEFAULT_CARRIER_NAMESPACE: &str = "http://tempuri.org/";

/// Everything the client needs to talk to the carrier. Built once at start-up and handed to [`crate::CarrierApi`].
#[derive(Debug, Clone)]
pub struct CarrierConfig {
    pub service_url: String,
    /// The XML namespace of the operation elements. Also the prefix of every `SOAPAction`.
    pub namespace: String,
    pub username: String,
    pub password: Secret<String>,
    pub customer_code: String,
    pub timeout: Duration,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_CARRIER_URL.to_string(),
            namespace: DEFAULT_CARRIER_NAMESPACE.to_string(),
            username: String::default(),
            password: Secret::default(),
            customer_code: String::default(),
            timeout: DEFAULT_CARRIER_TIMEOUT,
        }
    }
}

impl CarrierConfig {
    pub fn new_from_env_or_default() -> Self {
        let service_url = std::env::var("STK_CARRIER_URL").unwrap_or_else(|_| {
            warn!("🪛️ STK_CARRIER_URL not set, using (probably useless) default");
            DEFAULT_CARRIER_URL.to_string()
        });
        let namespace = std::env::var("STK_CARRIER_NAMESPACE").unwrap_or_else(|_| {
            info!("🪛️ STK_CARRIER_NAMESPACE not set, using {DEFAULT_CARRIER_NAMESPACE}");
            DEFAULT_CARRIER_NAMESPACE.to_string()
        });
        let username = std::env::var("STK_CARRIER_USERNAME").unwrap_or_else(|_| {
            warn!("🪛️ STK_CARRIER_USERNAME not set. Carrier calls will most likely be rejected.");
            String::default()
        });
        let password = Secret::new(std::env::var("STK_CARRIER_PASSWORD").unwrap_or_else(|_| {
            warn!("🪛️ STK_CARRIER_PASSWORD not set. Carrier calls will most likely be rejected.");
            String::default()
        }));
        let customer_code = std::env::var("STK_CARRIER_CUSTOMER_CODE").unwrap_or_else(|_| {
            warn!("🪛️ STK_CARRIER_CUSTOMER_CODE not set.");
            String::default()
        });
        let timeout = std::env::var("STK_CARRIER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid value for STK_CARRIER_TIMEOUT_SECS ({s}). {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CARRIER_TIMEOUT);
        Self { service_url, namespace, username, password, customer_code, timeout }
    }
}
