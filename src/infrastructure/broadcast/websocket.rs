//! WebSocket fan-out of live updates
//!
//! Publications go through a `tokio::sync::broadcast` channel; every
//! connected WebSocket client holds a receiver and gets each frame as a
//! JSON text message. Slow clients that lag past the channel capacity
//! lose the missed frames, which matches the no-delivery-guarantee
//! contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::broadcast::{Channel, UpdatePublisher};

const CHANNEL_CAPACITY: usize = 64;

/// A single broadcast frame as sent to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastFrame {
    pub channel: Channel,
    pub payload: Value,
}

/// Publisher fanning frames out to all subscribed WebSocket connections
#[derive(Debug)]
pub struct WsBroadcaster {
    tx: broadcast::Sender<BroadcastFrame>,
}

impl WsBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribes a new client; each subscriber sees frames published
    /// after this call
    pub fn subscribe(&self) -> broadcast::Receiver<BroadcastFrame> {
        self.tx.subscribe()
    }

    /// Number of currently connected subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for WsBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpdatePublisher for WsBroadcaster {
    async fn publish(&self, channel: Channel, payload: Value) {
        let frame = BroadcastFrame { channel, payload };

        // send only fails when there are no subscribers
        match self.tx.send(frame) {
            Ok(receivers) => debug!(%channel, receivers, "Broadcast frame published"),
            Err(_) => debug!(%channel, "No subscribers, frame dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscriber_receives_frame() {
        let broadcaster = WsBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster
            .publish(Channel::Leaders, json!([{"name": "Alice"}]))
            .await;

        let frame = rx.recv().await.unwrap();
        assert_eq!(frame.channel, Channel::Leaders);
        assert_eq!(frame.payload[0]["name"], "Alice");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let broadcaster = WsBroadcaster::new();

        broadcaster.publish(Channel::Parts, json!([])).await;

        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_all_subscribers_receive() {
        let broadcaster = WsBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.publish(Channel::System, json!({"x": 1})).await;

        assert_eq!(rx1.recv().await.unwrap().payload["x"], 1);
        assert_eq!(rx2.recv().await.unwrap().payload["x"], 1);
    }

    #[test]
    fn test_frame_serialization() {
        let frame = BroadcastFrame {
            channel: Channel::Todos,
            payload: json!({"todoId": "t1"}),
        };

        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"channel\":\"todos\""));
        assert!(json.contains("\"todoId\":\"t1\""));
    }
}
