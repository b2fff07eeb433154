//! Broadcast domain - live-update fan-out contract

mod publisher;

pub use publisher::{Channel, EventKind, UpdateEvent, UpdatePublisher};

#[cfg(test)]
pub use publisher::mock::RecordingPublisher;
