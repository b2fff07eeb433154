//! In-memory document store implementation

use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::DomainError;
use crate::domain::store::DocumentStore;

/// Document store backed by an in-process JSON tree
///
/// Paths navigate nested objects segment by segment, matching the remote
/// store's hierarchical layout. Useful for development and tests; data is
/// lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    root: RwLock<Value>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Value::Object(Map::new())),
        }
    }

    fn segments(path: &str) -> Result<Vec<&str>, DomainError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if segments.is_empty() {
            return Err(DomainError::storage("Empty store path"));
        }

        Ok(segments)
    }

    fn lookup<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
        let mut current = root;

        for segment in segments {
            current = current.as_object()?.get(*segment)?;
        }

        Some(current)
    }

    /// Walks to the parent of the final segment, creating objects on the way
    fn lookup_parent_mut<'a>(
        root: &'a mut Value,
        segments: &[&str],
    ) -> Result<&'a mut Map<String, Value>, DomainError> {
        let mut current = root;

        for segment in &segments[..segments.len() - 1] {
            let object = current
                .as_object_mut()
                .ok_or_else(|| DomainError::storage("Path crosses a non-object value"))?;

            current = object
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        current
            .as_object_mut()
            .ok_or_else(|| DomainError::storage("Path crosses a non-object value"))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn read(&self, path: &str) -> Result<Option<Value>, DomainError> {
        let segments = Self::segments(path)?;
        let root = self
            .root
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(Self::lookup(&root, &segments).cloned())
    }

    async fn write(&self, path: &str, value: &Value) -> Result<(), DomainError> {
        let segments = Self::segments(path)?;
        let mut root = self
            .root
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let parent = Self::lookup_parent_mut(&mut root, &segments)?;
        parent.insert(segments[segments.len() - 1].to_string(), value.clone());

        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), DomainError> {
        let segments = Self::segments(path)?;
        let mut root = self
            .root
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let parent = Self::lookup_parent_mut(&mut root, &segments)?;
        parent.remove(segments[segments.len() - 1]);

        Ok(())
    }

    async fn update_fields(
        &self,
        path: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), DomainError> {
        let segments = Self::segments(path)?;
        let mut root = self
            .root
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        let parent = Self::lookup_parent_mut(&mut root, &segments)?;
        let doc = parent
            .entry(segments[segments.len() - 1].to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        let object = doc
            .as_object_mut()
            .ok_or_else(|| DomainError::storage("Cannot update fields of a non-object document"))?;

        for (key, value) in fields {
            object.insert(key.clone(), value.clone());
        }

        Ok(())
    }
}
