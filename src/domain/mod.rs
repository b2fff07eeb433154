//! Domain layer - entities and external-collaborator contracts

pub mod broadcast;
pub mod cache;
pub mod error;
pub mod leader;
pub mod part;
pub mod stats;
pub mod store;
pub mod todo;

pub use broadcast::{Channel, EventKind, UpdateEvent, UpdatePublisher};
pub use cache::{TtlCache, TtlCacheExt};
pub use error::DomainError;
pub use leader::Leader;
pub use part::{Part, TodoPatch};
pub use stats::SystemStats;
pub use store::{DocumentStore, DocumentStoreExt};
pub use todo::TodoItem;
