//! System endpoints

use axum::extract::State;

use super::state::AppState;
use super::types::{ApiError, ApiResponse, Json};
use crate::domain::leader::Leader;
use crate::domain::stats::SystemStats;

pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SystemStats>>, ApiError> {
    let stats = state.system.stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn reset(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Leader>>>, ApiError> {
    let leaders = state.system.reset().await?;
    Ok(Json(ApiResponse::ok(leaders)))
}
