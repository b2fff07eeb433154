//! Leader service - registration and per-leader todo progress

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use super::PartService;
use super::publish_json;
use crate::domain::DomainError;
use crate::domain::broadcast::{Channel, EventKind, UpdatePublisher};
use crate::domain::cache::{TtlCache, TtlCacheExt, keys};
use crate::domain::leader::Leader;
use crate::domain::store::{DocumentStore, DocumentStoreExt, paths};
use crate::domain::todo::TodoItem;

/// Service managing registered leaders
///
/// Mutations follow the same protocol as parts: persist, invalidate the
/// leader cache keys (stats included, every leader mutation can change
/// them), re-read the canonical list and broadcast it on the `leaders`
/// channel.
#[derive(Debug)]
pub struct LeaderService {
    store: Arc<dyn DocumentStore>,
    cache: Arc<dyn TtlCache>,
    publisher: Arc<dyn UpdatePublisher>,
    parts: Arc<PartService>,
}

impl LeaderService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        cache: Arc<dyn TtlCache>,
        publisher: Arc<dyn UpdatePublisher>,
        parts: Arc<PartService>,
    ) -> Self {
        Self {
            store,
            cache,
            publisher,
            parts,
        }
    }

    /// List all leaders, served from cache when fresh
    pub async fn list(&self) -> Result<Vec<Leader>, DomainError> {
        if let Some(cached) = self.cache.get::<Vec<Leader>>(keys::LEADERS_ALL).await {
            debug!("Serving leaders list from cache");
            return Ok(cached);
        }

        let leaders: Vec<Leader> = self.store.read_children(paths::LEADERS).await?;
        self.cache.put(keys::LEADERS_ALL, &leaders).await;

        Ok(leaders)
    }

    /// Get a single leader by id
    pub async fn get(&self, id: &str) -> Result<Option<Leader>, DomainError> {
        self.store.read_as(&paths::leader(id)).await
    }

    /// Register a new leader under the given name
    ///
    /// The new leader receives a by-value copy of the active part's todo
    /// list; later part edits do not touch it. Names are unique
    /// case-insensitively and the duplicate check runs before anything is
    /// written.
    pub async fn register(&self, name: &str) -> Result<Leader, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Leader name must not be empty"));
        }

        info!(name, "Registering leader");

        let leaders = self.list().await?;
        let lowered = name.to_lowercase();
        if leaders.iter().any(|l| l.name().to_lowercase() == lowered) {
            return Err(DomainError::conflict(format!(
                "Leader '{}' is already registered",
                name
            )));
        }

        let todo_list = match self.parts.get_active().await? {
            Some(part) => part
                .todo_list()
                .iter()
                .map(|todo| TodoItem::new(todo.title(), todo.description()))
                .collect(),
            None => Vec::new(),
        };

        let leader = Leader::register(name, todo_list);

        self.store
            .write_value(&paths::leader(leader.id()), &leader)
            .await?;
        self.refresh_and_broadcast().await?;
        self.publisher
            .publish_event(
                Channel::System,
                EventKind::LeaderRegistered,
                json!({"leaderId": leader.id(), "name": leader.name()}),
            )
            .await;

        Ok(leader)
    }

    /// Mark a leader as completed, clearing any help request
    pub async fn complete(&self, id: &str) -> Result<Leader, DomainError> {
        info!(id, "Completing leader");

        let mut leader = self.require(id).await?;
        leader.complete();

        self.store.write_value(&paths::leader(id), &leader).await?;
        self.refresh_and_broadcast().await?;
        self.publisher
            .publish_event(
                Channel::System,
                EventKind::LeaderCompleted,
                json!({"leaderId": id}),
            )
            .await;

        Ok(leader)
    }

    /// Flip a leader's help flag; raising it clears the completed flag
    pub async fn toggle_help(&self, id: &str) -> Result<Leader, DomainError> {
        info!(id, "Toggling leader help flag");

        let mut leader = self.require(id).await?;
        leader.set_needs_help(!leader.needs_help());

        self.store.write_value(&paths::leader(id), &leader).await?;
        self.refresh_and_broadcast().await?;
        self.publisher
            .publish_event(
                Channel::System,
                EventKind::LeaderNeedsHelp,
                json!({"leaderId": id, "needsHelp": leader.needs_help()}),
            )
            .await;

        Ok(leader)
    }

    /// Delete a leader
    pub async fn delete(&self, id: &str) -> Result<Leader, DomainError> {
        info!(id, "Deleting leader");

        let leader = self.require(id).await?;

        self.store.remove(&paths::leader(id)).await?;
        self.refresh_and_broadcast().await?;
        self.publisher
            .publish_event(
                Channel::System,
                EventKind::LeaderDeleted,
                json!({"leaderId": id}),
            )
            .await;

        Ok(leader)
    }

    /// Flip the completion flag of one of the leader's own todos
    pub async fn toggle_todo(&self, leader_id: &str, todo_id: &str) -> Result<Leader, DomainError> {
        info!(leader_id, todo_id, "Toggling leader todo");

        let mut leader = self.require(leader_id).await?;
        let completed = leader.toggle_todo(todo_id).ok_or_else(|| {
            DomainError::not_found(format!(
                "Todo '{}' not found for leader '{}'",
                todo_id, leader_id
            ))
        })?;

        self.store
            .write_value(&paths::leader(leader_id), &leader)
            .await?;
        self.refresh_and_broadcast().await?;
        self.publisher
            .publish_event(
                Channel::Todos,
                EventKind::TodoToggled,
                json!({"leaderId": leader_id, "todoId": todo_id, "completed": completed}),
            )
            .await;

        Ok(leader)
    }

    async fn require(&self, id: &str) -> Result<Leader, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Leader '{}' not found", id)))
    }

    /// Invalidate leader cache keys, re-read the canonical list and
    /// broadcast it
    async fn refresh_and_broadcast(&self) -> Result<Vec<Leader>, DomainError> {
        self.cache.remove(keys::LEADERS_ALL).await;
        self.cache.remove(keys::SYSTEM_STATS).await;

        let leaders = self.list().await?;
        publish_json(self.publisher.as_ref(), Channel::Leaders, &leaders).await;

        Ok(leaders)
    }
}
