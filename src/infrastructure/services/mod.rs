//! Domain services
//!
//! Every mutation runs the same sequence: validate, apply the change,
//! persist it, invalidate the affected cache keys, re-read the canonical
//! collection (which repopulates the cache) and broadcast the fresh
//! state. The store stays authoritative throughout; the cache and the
//! broadcast layer only ever trail it.

mod leader_service;
mod part_service;
mod system_service;

pub use leader_service::LeaderService;
pub use part_service::{CreatePartRequest, NewTodo, PartService, UpdatePartRequest};
pub use system_service::SystemService;

use serde::Serialize;
use tracing::warn;

use crate::domain::broadcast::{Channel, UpdatePublisher};

/// Serialize and publish a value, dropping it with a warning on failure
pub(crate) async fn publish_json<T: Serialize>(
    publisher: &dyn UpdatePublisher,
    channel: Channel,
    value: &T,
) {
    match serde_json::to_value(value) {
        Ok(payload) => publisher.publish(channel, payload).await,
        Err(e) => warn!(%channel, error = %e, "Dropping broadcast, payload failed to serialize"),
    }
}
