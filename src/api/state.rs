//! Application state shared by all handlers

use std::sync::Arc;

use crate::infrastructure::broadcast::WsBroadcaster;
use crate::infrastructure::services::{LeaderService, PartService, SystemService};

/// Shared services, cheap to clone per request
#[derive(Clone)]
pub struct AppState {
    pub leaders: Arc<LeaderService>,
    pub parts: Arc<PartService>,
    pub system: Arc<SystemService>,
    pub broadcaster: Arc<WsBroadcaster>,
}
