//! System service - stats and full reset

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use super::{LeaderService, PartService, publish_json};
use crate::domain::DomainError;
use crate::domain::broadcast::{Channel, EventKind, UpdatePublisher};
use crate::domain::cache::{TtlCache, TtlCacheExt, keys};
use crate::domain::leader::Leader;
use crate::domain::stats::SystemStats;
use crate::domain::store::{DocumentStore, DocumentStoreExt, paths};

/// Service for system-wide operations spanning leaders and parts
#[derive(Debug)]
pub struct SystemService {
    store: Arc<dyn DocumentStore>,
    cache: Arc<dyn TtlCache>,
    publisher: Arc<dyn UpdatePublisher>,
    leaders: Arc<LeaderService>,
    parts: Arc<PartService>,
}

impl SystemService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        cache: Arc<dyn TtlCache>,
        publisher: Arc<dyn UpdatePublisher>,
        leaders: Arc<LeaderService>,
        parts: Arc<PartService>,
    ) -> Self {
        Self {
            store,
            cache,
            publisher,
            leaders,
            parts,
        }
    }

    /// Current progress counters, computed from the leader list and cached
    pub async fn stats(&self) -> Result<SystemStats, DomainError> {
        if let Some(cached) = self.cache.get::<SystemStats>(keys::SYSTEM_STATS).await {
            debug!("Serving stats from cache");
            return Ok(cached);
        }

        let leaders = self.leaders.list().await?;
        let stats = SystemStats::from_leaders(&leaders);

        self.cache.put(keys::SYSTEM_STATS, &stats).await;
        Ok(stats)
    }

    /// Reset the whole system back to a clean slate
    ///
    /// Every leader keeps its registration but loses its flags and todo
    /// progress; the active-part marker and the persisted stats snapshot
    /// are removed. The parts themselves are left untouched. Afterwards
    /// the entire cache is dropped and both collections are re-broadcast.
    pub async fn reset(&self) -> Result<Vec<Leader>, DomainError> {
        info!("Resetting system");

        let mut leaders = self.leaders.list().await?;
        for leader in &mut leaders {
            leader.reset();
        }

        let writes = leaders.iter().map(|leader| {
            let path = paths::leader(leader.id());
            async move { self.store.write_value(&path, leader).await }
        });
        futures::future::try_join_all(writes).await?;

        futures::try_join!(
            self.store.remove(paths::ACTIVE_PART),
            self.store.remove(paths::STATS),
        )?;

        self.cache.clear().await;

        let leaders = self.leaders.list().await?;
        let parts = self.parts.list().await?;
        publish_json(self.publisher.as_ref(), Channel::Leaders, &leaders).await;
        publish_json(self.publisher.as_ref(), Channel::Parts, &parts).await;
        self.publisher
            .publish_event(
                Channel::System,
                EventKind::SystemReset,
                json!({"totalLeaders": leaders.len()}),
            )
            .await;

        Ok(leaders)
    }
}
