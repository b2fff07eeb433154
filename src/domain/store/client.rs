//! Document store contract

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Store path layout
///
/// The remote store is addressed by hierarchical string paths. Entity
/// documents live under a collection segment; system-level markers live
/// under `system/`.
pub mod paths {
    /// Collection of leader documents
    pub const LEADERS: &str = "leaders";
    /// Collection of part documents
    pub const PARTS: &str = "parts";
    /// Single pointer to the currently active part's id
    pub const ACTIVE_PART: &str = "system/activePart";
    /// Last persisted stats snapshot, cleared on reset
    pub const STATS: &str = "system/stats";

    pub fn leader(id: &str) -> String {
        format!("{}/{}", LEADERS, id)
    }

    pub fn part(id: &str) -> String {
        format!("{}/{}", PARTS, id)
    }
}

/// Key-path get/set/remove abstraction over a remote document store
///
/// All operations are asynchronous and fail with a storage-level
/// `DomainError`; callers surface failures, they do not retry. A path
/// denoting a collection reads as an object whose values are the child
/// documents.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Reads the value at `path`, absent as `None`
    async fn read(&self, path: &str) -> Result<Option<Value>, DomainError>;

    /// Writes `value` at `path`, replacing whatever was there
    async fn write(&self, path: &str, value: &Value) -> Result<(), DomainError>;

    /// Removes the value at `path`; removing an absent path is not an error
    async fn remove(&self, path: &str) -> Result<(), DomainError>;

    /// Merges `fields` into the document at `path`, leaving other fields intact
    async fn update_fields(
        &self,
        path: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), DomainError>;
}

/// Extension trait providing typed reads and writes
pub trait DocumentStoreExt: DocumentStore {
    /// Reads and deserializes the document at `path`
    fn read_as<'a, T>(
        &'a self,
        path: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<T>, DomainError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            match self.read(path).await? {
                Some(value) => {
                    let parsed = serde_json::from_value(value).map_err(|e| {
                        DomainError::storage(format!(
                            "Failed to deserialize document at '{}': {}",
                            path, e
                        ))
                    })?;
                    Ok(Some(parsed))
                }
                None => Ok(None),
            }
        }
    }

    /// Serializes and writes `value` at `path`
    fn write_value<'a, T>(
        &'a self,
        path: &'a str,
        value: &'a T,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        T: Serialize + Send + Sync,
    {
        async move {
            let value = serde_json::to_value(value).map_err(|e| {
                DomainError::storage(format!("Failed to serialize document for '{}': {}", path, e))
            })?;
            self.write(path, &value).await
        }
    }

    /// Reads a collection path and deserializes every child document
    ///
    /// An absent collection reads as empty.
    fn read_children<'a, T>(
        &'a self,
        path: &'a str,
    ) -> impl std::future::Future<Output = Result<Vec<T>, DomainError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let Some(value) = self.read(path).await? else {
                return Ok(Vec::new());
            };

            let children = value.as_object().ok_or_else(|| {
                DomainError::storage(format!("Expected a collection at '{}'", path))
            })?;

            let mut parsed = Vec::with_capacity(children.len());

            for (key, child) in children {
                let child = serde_json::from_value(child.clone()).map_err(|e| {
                    DomainError::storage(format!(
                        "Failed to deserialize child '{}' of '{}': {}",
                        key, path, e
                    ))
                })?;
                parsed.push(child);
            }

            Ok(parsed)
        }
    }
}

// Blanket implementation for all types implementing DocumentStore
impl<T: DocumentStore + ?Sized> DocumentStoreExt for T {}


#[cfg(test)]
mod tests {
    use super::mock::MockDocumentStore;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_helpers() {
        assert_eq!(paths::leader("abc"), "leaders/abc");
        assert_eq!(paths::part("xyz"), "parts/xyz");
        assert_eq!(paths::ACTIVE_PART, "system/activePart");
    }

    #[tokio::test]
    async fn test_read_absent_path() {
        let store = MockDocumentStore::new();

        let value = store.read("leaders/missing").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = MockDocumentStore::new();

        store
            .write("system/activePart", &json!("part-1"))
            .await
            .unwrap();

        let value = store.read("system/activePart").await.unwrap();
        assert_eq!(value, Some(json!("part-1")));
    }

    #[tokio::test]
    async fn test_collection_read_gathers_children() {
        let store = MockDocumentStore::new()
            .with_document("leaders/a", json!({"name": "Alice"}))
            .with_document("leaders/b", json!({"name": "Bob"}));

        let value = store.read("leaders").await.unwrap().unwrap();
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_read_children_typed() {
        #[derive(Debug, serde::Deserialize)]
        struct Doc {
            name: String,
        }

        let store = MockDocumentStore::new()
            .with_document("leaders/a", json!({"name": "Alice"}))
            .with_document("leaders/b", json!({"name": "Bob"}));

        let mut docs: Vec<Doc> = store.read_children("leaders").await.unwrap();
        docs.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_read_children_absent_is_empty() {
        let store = MockDocumentStore::new();

        let docs: Vec<Value> = store.read_children("leaders").await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_update_fields_merges() {
        let store =
            MockDocumentStore::new().with_document("parts/p", json!({"active": true, "name": "P"}));

        let mut fields = Map::new();
        fields.insert("active".to_string(), json!(false));
        store.update_fields("parts/p", &fields).await.unwrap();

        let value = store.read("parts/p").await.unwrap().unwrap();
        assert_eq!(value["active"], json!(false));
        assert_eq!(value["name"], json!("P"));
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let store = MockDocumentStore::new().with_error("connection lost");

        let result = store.read("leaders").await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
