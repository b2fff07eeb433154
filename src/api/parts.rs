//! Part endpoints

use axum::extract::{Path, State};
use serde::Deserialize;

use super::state::AppState;
use super::types::{ApiError, ApiResponse, Json};
use crate::domain::part::{Part, TodoPatch};
use crate::infrastructure::services::{CreatePartRequest, NewTodo, UpdatePartRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub todos: Vec<NewTodoBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodoBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub todos: Vec<TodoPatch>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Part>>>, ApiError> {
    let parts = state.parts.list().await?;
    Ok(Json(ApiResponse::ok(parts)))
}

pub async fn get_active(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<Part>>>, ApiError> {
    let active = state.parts.get_active().await?;
    Ok(Json(ApiResponse::ok(active)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreatePartBody>,
) -> Result<Json<ApiResponse<Part>>, ApiError> {
    let request = CreatePartRequest {
        name: body.name,
        description: body.description,
        todos: body
            .todos
            .into_iter()
            .map(|t| NewTodo {
                title: t.title,
                description: t.description,
            })
            .collect(),
    };

    let part = state.parts.create(request).await?;
    Ok(Json(ApiResponse::ok(part)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePartBody>,
) -> Result<Json<ApiResponse<Part>>, ApiError> {
    let request = UpdatePartRequest {
        name: body.name,
        description: body.description,
        todos: body.todos,
    };

    let part = state.parts.update(&id, request).await?;
    Ok(Json(ApiResponse::ok(part)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Part>>, ApiError> {
    let part = state.parts.delete(&id).await?;
    Ok(Json(ApiResponse::ok(part)))
}

pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Part>>, ApiError> {
    let part = state.parts.activate(&id).await?;
    Ok(Json(ApiResponse::ok(part)))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Path((part_id, todo_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Part>>, ApiError> {
    let part = state.parts.toggle_todo(&part_id, &todo_id).await?;
    Ok(Json(ApiResponse::ok(part)))
}
