//! Cache domain - time-boxed cache contract and keys

mod repository;

pub use repository::{DEFAULT_TTL, TtlCache, TtlCacheExt, keys};

#[cfg(test)]
pub use repository::mock::MockTtlCache;
