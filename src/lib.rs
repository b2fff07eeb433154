//! StepTogether API
//!
//! Backend for a collaborative checklist board: parts (shift templates)
//! define a todo list, leaders register against the active part and work
//! through their own copy, and every change is pushed to connected
//! clients over WebSocket. State lives in a remote document store; reads
//! go through a short-lived in-memory cache that mutations invalidate.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::AppState;
use config::StoreBackend;
use domain::broadcast::UpdatePublisher;
use domain::cache::TtlCache;
use domain::store::DocumentStore;
use domain::DomainError;
use infrastructure::broadcast::WsBroadcaster;
use infrastructure::cache::InMemoryTtlCache;
use infrastructure::services::{LeaderService, PartService, SystemService};
use infrastructure::store::{InMemoryDocumentStore, RestDocumentStore, RestStoreConfig};
use tracing::info;

/// Create the application state with all services wired up
pub fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let store = create_store(config)?;
    let cache: Arc<dyn TtlCache> = Arc::new(InMemoryTtlCache::with_ttl(Duration::from_secs(
        config.cache.ttl_secs,
    )));
    let broadcaster = Arc::new(WsBroadcaster::new());
    let publisher: Arc<dyn UpdatePublisher> = broadcaster.clone();

    let parts = Arc::new(PartService::new(
        store.clone(),
        cache.clone(),
        publisher.clone(),
    ));
    let leaders = Arc::new(LeaderService::new(
        store.clone(),
        cache.clone(),
        publisher.clone(),
        parts.clone(),
    ));
    let system = Arc::new(SystemService::new(
        store,
        cache,
        publisher,
        leaders.clone(),
        parts.clone(),
    ));

    Ok(AppState {
        leaders,
        parts,
        system,
        broadcaster,
    })
}

fn create_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, DomainError> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        StoreBackend::Firebase => {
            let base_url = config.store.base_url.as_deref().ok_or_else(|| {
                DomainError::configuration("store.base_url is required for the firebase backend")
            })?;

            info!(base_url, "Using remote document store");

            let mut rest_config = RestStoreConfig::new(base_url);
            if let Some(token) = &config.store.auth_token {
                rest_config = rest_config.with_auth_token(token);
            }

            Ok(Arc::new(RestDocumentStore::new(rest_config)?))
        }
    }
}
