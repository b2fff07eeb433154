//! Remote document store client over the Firebase-style REST surface
//!
//! Every path maps to `{base_url}/{path}.json`; reads return `null` for
//! absent paths, writes PUT the full document, `update_fields` PATCHes a
//! partial document. Failures surface as storage errors; retries are the
//! caller's responsibility.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::domain::DomainError;
use crate::domain::store::DocumentStore;

/// Configuration for the REST document store
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Database root, e.g. `https://my-project.firebaseio.com`
    pub base_url: String,
    /// Optional auth token appended as the `auth` query parameter
    pub auth_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl RestStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

/// Document store client talking to the remote database over HTTP
#[derive(Debug)]
pub struct RestDocumentStore {
    client: Client,
    config: RestStoreConfig,
}

impl RestDocumentStore {
    pub fn new(config: RestStoreConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');

        match &self.config.auth_token {
            Some(token) => format!("{}/{}.json?auth={}", base, path, token),
            None => format!("{}/{}.json", base, path),
        }
    }

    async fn check_status(
        response: reqwest::Response,
        path: &str,
    ) -> Result<reqwest::Response, DomainError> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            Err(DomainError::storage(format!(
                "Store request for '{}' failed with status {}",
                path, status
            )))
        }
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn read(&self, path: &str) -> Result<Option<Value>, DomainError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("Store read for '{}' failed: {}", path, e)))?;

        let response = Self::check_status(response, path).await?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| DomainError::storage(format!("Store read for '{}' returned invalid JSON: {}", path, e)))?;

        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    async fn write(&self, path: &str, value: &Value) -> Result<(), DomainError> {
        let response = self
            .client
            .put(self.url(path))
            .json(value)
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("Store write for '{}' failed: {}", path, e)))?;

        Self::check_status(response, path).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("Store remove for '{}' failed: {}", path, e)))?;

        Self::check_status(response, path).await?;
        Ok(())
    }

    async fn update_fields(
        &self,
        path: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), DomainError> {
        let response = self
            .client
            .patch(self.url(path))
            .json(fields)
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("Store update for '{}' failed: {}", path, e)))?;

        Self::check_status(response, path).await?;
        Ok(())
    }
}
