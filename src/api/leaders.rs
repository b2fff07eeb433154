//! Leader endpoints

use axum::extract::{Path, State};
use serde::Deserialize;

use super::state::AppState;
use super::types::{ApiError, ApiResponse, Json};
use crate::domain::leader::Leader;

#[derive(Debug, Deserialize)]
pub struct RegisterLeaderRequest {
    pub name: String,
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Leader>>>, ApiError> {
    let leaders = state.leaders.list().await?;
    Ok(Json(ApiResponse::ok(leaders)))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterLeaderRequest>,
) -> Result<Json<ApiResponse<Leader>>, ApiError> {
    let leader = state.leaders.register(&request.name).await?;
    Ok(Json(ApiResponse::ok(leader)))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Leader>>, ApiError> {
    let leader = state.leaders.complete(&id).await?;
    Ok(Json(ApiResponse::ok(leader)))
}

pub async fn toggle_help(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Leader>>, ApiError> {
    let leader = state.leaders.toggle_help(&id).await?;
    Ok(Json(ApiResponse::ok(leader)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Leader>>, ApiError> {
    let leader = state.leaders.delete(&id).await?;
    Ok(Json(ApiResponse::ok(leader)))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Path((leader_id, todo_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Leader>>, ApiError> {
    let leader = state.leaders.toggle_todo(&leader_id, &todo_id).await?;
    Ok(Json(ApiResponse::ok(leader)))
}
