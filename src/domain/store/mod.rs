//! Document store domain - key-path contract over the remote store

mod client;

pub use client::{DocumentStore, DocumentStoreExt, paths};

#[cfg(test)]
pub use client::mock::MockDocumentStore;
