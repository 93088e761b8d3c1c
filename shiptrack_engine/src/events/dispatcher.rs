use log::*;

use super::EventProducer;
use crate::traits::{NotificationDispatcher, NotificationError, ShipmentNotification};

/// A [`NotificationDispatcher`] that only queues the notification. Delivery happens in whatever handler consumes the
/// channel, so `send` succeeds as soon as the event is queued.
#[derive(Clone)]
pub struct ChannelDispatcher {
    producer: EventProducer<ShipmentNotification>,
}

impl ChannelDispatcher {
    pub fn new(producer: EventProducer<ShipmentNotification>) -> Self {
        Self { producer }
    }
}

impl NotificationDispatcher for ChannelDispatcher {
    async fn send(&self, notification: ShipmentNotification) -> Result<(), NotificationError> {
        trace!("📬️ Queueing {} notification for order {}", notification.status, notification.order_id);
        self.producer.publish_event(notification).await.map_err(|_| NotificationError::ChannelClosed)
    }
}

#[cfg(test)]
mod test {
    use std::{
        future::Future,
        pin::Pin,
        sync::{Arc, Mutex},
    };

    use chrono::Utc;

    use super::*;
    use crate::{
        db_types::{CanonicalStatus, OrderId},
        events::{EventHandler, Handler},
    };

    #[tokio::test]
    async fn queued_notifications_reach_the_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s2 = seen.clone();
        let handler: Handler<ShipmentNotification> = Arc::new(move |n: ShipmentNotification| {
            let seen = seen.clone();
            Box::pin(async move {
                seen.lock().unwrap().push(n.order_id);
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        });
        let event_handler = EventHandler::new(4, handler);
        let dispatcher = ChannelDispatcher::new(event_handler.subscribe());
        let notification = ShipmentNotification {
            destination: "ops@example.com".into(),
            order_id: OrderId::from("1001"),
            tracking_number: Some("7001".into()),
            tracking_url: None,
            status: CanonicalStatus::Delivered,
            vendor_status_text: Some("Delivered".into()),
            occurred_at: Utc::now(),
        };
        dispatcher.send(notification).await.unwrap();
        drop(dispatcher);
        event_handler.start_handler().await;
        assert_eq!(*s2.lock().unwrap(), vec![OrderId::from("1001")]);
    }
}
