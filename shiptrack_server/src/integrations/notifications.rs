//! Delivers shipment notifications queued by the engine.
//!
//! The engine only publishes [`ShipmentNotification`]s into the event channel. The handler built here picks them up
//! and POSTs them as JSON to a webhook (a mailer, a chat bot, the storefront's own notification service). Without a
//! webhook, notifications are written to the log and dropped.
use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use log::*;
use reqwest::Client;
use shiptrack_engine::{
    events::{EventHandler, Handler},
    NotificationError,
    ShipmentNotification,
};

pub const NOTIFICATION_BUFFER_SIZE: usize = 25;
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct WebhookNotifier {
    url: String,
    client: Arc<Client>,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|e| NotificationError::DeliveryFailed(e.to_string()))?;
        Ok(Self { url, client: Arc::new(client) })
    }

    pub async fn deliver(&self, notification: &ShipmentNotification) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .map_err(|e| NotificationError::DeliveryFailed(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(NotificationError::DeliveryFailed(format!("Webhook responded with {status}. {body}")))
        }
    }
}

/// Builds the event handler that consumes shipment notifications. Spawn [`EventHandler::start_handler`] and hand
/// [`EventHandler::subscribe`] to the engine.
pub fn create_notification_handler(
    webhook_url: Option<String>,
) -> Result<EventHandler<ShipmentNotification>, NotificationError> {
    let handler: Handler<ShipmentNotification> = match webhook_url {
        Some(url) => {
            let notifier = WebhookNotifier::new(url)?;
            Arc::new(move |notification: ShipmentNotification| -> BoxFuture<'static, ()> {
                let notifier = notifier.clone();
                Box::pin(async move {
                    match notifier.deliver(&notification).await {
                        Ok(()) => info!(
                            "📬️ {} notification for order {} delivered to {}",
                            notification.status, notification.order_id, notifier.url
                        ),
                        Err(e) => error!(
                            "📬️ Could not deliver {} notification for order {}. {e}",
                            notification.status, notification.order_id
                        ),
                    }
                })
            })
        },
        None => Arc::new(|notification: ShipmentNotification| -> BoxFuture<'static, ()> {
            Box::pin(async move {
                info!(
                    "📬️ Shipment for order {} is now {} ({}). Notification for '{}' not delivered: no webhook \
                     configured",
                    notification.order_id,
                    notification.status,
                    notification.vendor_status_text.as_deref().unwrap_or("no carrier text"),
                    notification.destination
                );
            })
        }),
    };
    Ok(EventHandler::new(NOTIFICATION_BUFFER_SIZE, handler))
}
