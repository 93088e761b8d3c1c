use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db_types::{CanonicalStatus, OrderId};

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("The notification channel is closed")]
    ChannelClosed,
    #[error("Notification could not be delivered: {0}")]
    DeliveryFailed(String),
}

/// What a notification says about a shipment. Turning this into an email or message is the receiver's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentNotification {
    pub destination: String,
    pub order_id: OrderId,
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
    pub status: CanonicalStatus,
    pub vendor_status_text: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// A best-effort outbound alert channel.
///
/// The engine awaits `send` only to log the outcome. A failure never changes shipment state.
#[allow(async_fn_in_trait)]
pub trait NotificationDispatcher {
    async fn send(&self, notification: ShipmentNotification) -> Result<(), NotificationError>;
}
