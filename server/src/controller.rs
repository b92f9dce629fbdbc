//! `/todos` handlers.
//!
//! Each handler builds a `TodoService` for its request, calls it once and
//! turns the answer into a status code. Absent results become 404 here and
//! nowhere else.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use todo_core::{TodoCreateInput, TodoId, TodoReadOutput, TodoUpdateInput};

use crate::error::ApiError;
use crate::extract::{RequestCancel, ValidatedJson};
use crate::AppState;

pub async fn list_todos(
    State(state): State<AppState>,
    cancel: RequestCancel,
) -> Result<Json<Vec<TodoReadOutput>>, ApiError> {
    let todos = state.service().get_all(cancel.token()).await?;
    Ok(Json(todos))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    cancel: RequestCancel,
) -> Result<Json<TodoReadOutput>, ApiError> {
    let todo = state.service().get_by_id(id, cancel.token()).await?;
    todo.map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_todo(
    State(state): State<AppState>,
    cancel: RequestCancel,
    ValidatedJson(input): ValidatedJson<TodoCreateInput>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.service().create(input, cancel.token()).await?;
    let location = format!("/todos/{}", todo.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(todo)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    cancel: RequestCancel,
    ValidatedJson(input): ValidatedJson<TodoUpdateInput>,
) -> Result<Json<TodoReadOutput>, ApiError> {
    let todo = state.service().update(id, input, cancel.token()).await?;
    todo.map(Json).ok_or(ApiError::NotFound)
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    cancel: RequestCancel,
) -> Result<StatusCode, ApiError> {
    if state.service().delete(id, cancel.token()).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
