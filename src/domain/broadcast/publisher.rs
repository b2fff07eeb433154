//! Broadcast publisher contract

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Broadcast channels carrying live updates
///
/// `Leaders` and `Parts` carry the raw current collection after every
/// relevant mutation; `System` and `Todos` carry `UpdateEvent` envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Leaders,
    Parts,
    System,
    Todos,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leaders => "leaders",
            Self::Parts => "parts",
            Self::System => "system",
            Self::Todos => "todos",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kinds of envelope events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    LeaderRegistered,
    LeaderCompleted,
    LeaderNeedsHelp,
    LeaderDeleted,
    TodoToggled,
    PartActivated,
    SystemReset,
}

/// Event envelope for the `system` and `todos` channels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub data: Value,
    /// Epoch millis at publication time
    pub timestamp: i64,
}

impl UpdateEvent {
    pub fn new(kind: EventKind, data: Value) -> Self {
        Self {
            kind,
            data,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Fan-out of state updates to all subscribers of a channel
///
/// Fire-and-forget: no delivery guarantee, no acknowledgement, no
/// back-pressure. Implementations log failures instead of returning them;
/// a lost broadcast leaves the store authoritative and clients catch up
/// on their next read.
#[async_trait]
pub trait UpdatePublisher: Send + Sync + Debug {
    /// Publishes a payload on the given channel
    async fn publish(&self, channel: Channel, payload: Value);

    /// Publishes an event envelope on the given channel
    async fn publish_event(&self, channel: Channel, kind: EventKind, data: Value) {
        match serde_json::to_value(UpdateEvent::new(kind, data)) {
            Ok(payload) => self.publish(channel, payload).await,
            Err(e) => tracing::warn!(%channel, error = %e, "Dropping event, envelope failed to serialize"),
        }
    }
}
