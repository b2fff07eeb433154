mod in_memory;
mod rest;

pub use in_memory::InMemoryDocumentStore;
pub use rest::{RestDocumentStore, RestStoreConfig};
