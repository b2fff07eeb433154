//! Part service - template management and activation

use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use super::publish_json;
use crate::domain::DomainError;
use crate::domain::broadcast::{Channel, EventKind, UpdatePublisher};
use crate::domain::cache::{TtlCache, TtlCacheExt, keys};
use crate::domain::part::{Part, TodoPatch};
use crate::domain::store::{DocumentStore, DocumentStoreExt, paths};
use crate::domain::todo::TodoItem;

/// Request for creating a new part
#[derive(Debug, Clone)]
pub struct CreatePartRequest {
    pub name: String,
    pub description: String,
    pub todos: Vec<NewTodo>,
}

/// A todo template item supplied at part creation
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

/// Request for updating a part
#[derive(Debug, Clone)]
pub struct UpdatePartRequest {
    pub name: String,
    pub description: String,
    pub todos: Vec<TodoPatch>,
}

/// Service managing part templates
///
/// Every mutation persists to the document store, invalidates the part
/// cache keys, re-reads the canonical list (repopulating the cache), and
/// broadcasts the fresh list on the `parts` channel, in that order.
#[derive(Debug)]
pub struct PartService {
    store: Arc<dyn DocumentStore>,
    cache: Arc<dyn TtlCache>,
    publisher: Arc<dyn UpdatePublisher>,
}

impl PartService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        cache: Arc<dyn TtlCache>,
        publisher: Arc<dyn UpdatePublisher>,
    ) -> Self {
        Self {
            store,
            cache,
            publisher,
        }
    }

    /// List all parts, served from cache when fresh
    pub async fn list(&self) -> Result<Vec<Part>, DomainError> {
        if let Some(cached) = self.cache.get::<Vec<Part>>(keys::PARTS_ALL).await {
            debug!("Serving parts list from cache");
            return Ok(cached);
        }

        let parts: Vec<Part> = self.store.read_children(paths::PARTS).await?;
        self.cache.put(keys::PARTS_ALL, &parts).await;

        Ok(parts)
    }

    /// Get a single part by id
    pub async fn get(&self, id: &str) -> Result<Option<Part>, DomainError> {
        self.store.read_as(&paths::part(id)).await
    }

    /// Resolve the active part through the `system/activePart` marker
    pub async fn get_active(&self) -> Result<Option<Part>, DomainError> {
        if let Some(cached) = self.cache.get::<Option<Part>>(keys::PARTS_ACTIVE).await {
            debug!("Serving active part from cache");
            return Ok(cached);
        }

        let marker: Option<String> = self.store.read_as(paths::ACTIVE_PART).await?;
        let active = match marker {
            Some(id) => self.store.read_as::<Part>(&paths::part(&id)).await?,
            None => None,
        };

        self.cache.put(keys::PARTS_ACTIVE, &active).await;
        Ok(active)
    }

    /// Create a new, inactive part
    pub async fn create(&self, request: CreatePartRequest) -> Result<Part, DomainError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Part name must not be empty"));
        }

        info!(name, "Creating part");

        let todos = request
            .todos
            .into_iter()
            .map(|t| TodoItem::new(t.title, t.description))
            .collect();
        let part = Part::new(name, request.description, todos);

        self.store.write_value(&paths::part(part.id()), &part).await?;
        self.refresh_and_broadcast().await?;

        Ok(part)
    }

    /// Update a part's name, description and todo template
    pub async fn update(&self, id: &str, request: UpdatePartRequest) -> Result<Part, DomainError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Part name must not be empty"));
        }

        info!(id, "Updating part");

        let mut part = self
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Part '{}' not found", id)))?;

        part.apply_update(name, request.description, request.todos);

        self.store.write_value(&paths::part(id), &part).await?;
        self.refresh_and_broadcast().await?;

        Ok(part)
    }

    /// Delete a part; deleting the active part clears the marker first
    pub async fn delete(&self, id: &str) -> Result<Part, DomainError> {
        info!(id, "Deleting part");

        let part = self
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Part '{}' not found", id)))?;

        let marker: Option<String> = self.store.read_as(paths::ACTIVE_PART).await?;
        if part.active() || marker.as_deref() == Some(id) {
            self.store.remove(paths::ACTIVE_PART).await?;
        }

        self.store.remove(&paths::part(id)).await?;
        self.refresh_and_broadcast().await?;

        Ok(part)
    }

    /// Activate a part, deactivating every other part first
    ///
    /// Two-phase, deliberately not atomic: phase one persists a
    /// deactivation write per currently-active part; phase two issues the
    /// target-part write and the marker write concurrently and awaits
    /// both. A crash between phases leaves no part active, an accepted
    /// intermediate state re-enforced by the next activation.
    pub async fn activate(&self, id: &str) -> Result<Part, DomainError> {
        info!(id, "Activating part");

        let parts = self.list().await?;
        let mut target = parts
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Part '{}' not found", id)))?;

        for part in parts.iter().filter(|p| p.id() != id && p.active()) {
            let mut fields = Map::new();
            fields.insert("active".to_string(), Value::Bool(false));
            self.store
                .update_fields(&paths::part(part.id()), &fields)
                .await?;
        }

        target.activate();
        let part_path = paths::part(id);
        let active_marker = Value::String(id.to_string());
        futures::try_join!(
            self.store.write_value(&part_path, &target),
            self.store.write(paths::ACTIVE_PART, &active_marker),
        )?;

        self.refresh_and_broadcast().await?;
        self.publisher
            .publish_event(
                Channel::System,
                EventKind::PartActivated,
                json!({"partId": id}),
            )
            .await;

        Ok(target)
    }

    /// Flip the completion flag of a template todo
    pub async fn toggle_todo(&self, part_id: &str, todo_id: &str) -> Result<Part, DomainError> {
        info!(part_id, todo_id, "Toggling part todo");

        let mut part = self
            .get(part_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Part '{}' not found", part_id)))?;

        let completed = part.toggle_todo(todo_id).ok_or_else(|| {
            DomainError::not_found(format!(
                "Todo '{}' not found in part '{}'",
                todo_id, part_id
            ))
        })?;

        self.store.write_value(&paths::part(part_id), &part).await?;
        self.refresh_and_broadcast().await?;
        self.publisher
            .publish_event(
                Channel::Todos,
                EventKind::TodoToggled,
                json!({"partId": part_id, "todoId": todo_id, "completed": completed}),
            )
            .await;

        Ok(part)
    }

    /// Invalidate part cache keys, re-read the canonical list and
    /// broadcast it
    async fn refresh_and_broadcast(&self) -> Result<Vec<Part>, DomainError> {
        self.cache.remove(keys::PARTS_ALL).await;
        self.cache.remove(keys::PARTS_ACTIVE).await;

        let parts = self.list().await?;
        publish_json(self.publisher.as_ref(), Channel::Parts, &parts).await;

        Ok(parts)
    }
}
