//! Request handlers for the todo endpoints.
//!
//! Create and update read their form from the `formData` key of the body.
//! A body without that key is taken as the form itself.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use todo_core::types::{MSG_CREATED, MSG_DELETED, MSG_UPDATED};
use todo_core::{
    validate_new, validate_patch, validate_todo, FieldErrors, MessageResponse, TodoListResponse,
    TodoResponse,
};
use tracing::{debug, info};

use crate::error::AppError;
use crate::AppState;

const FORM_DATA: &str = "formData";

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoListResponse>, AppError> {
    let todos = state.store.list().await?;
    debug!(count = todos.len(), "listing todos");
    Ok(Json(TodoListResponse { todos }))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    let form = form_data(payload)?;
    let new = validate_new(&form)?;
    let todo = state.store.create(new).await?;
    info!(id = todo.id, title = %todo.title, "todo created");
    Ok(Json(TodoResponse {
        todo,
        message: Some(MSG_CREATED.to_string()),
    }))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = state.store.find(id).await?.ok_or(AppError::NotFound)?;
    debug!(id, "todo retrieved");
    Ok(Json(TodoResponse {
        todo,
        message: None,
    }))
}

/// Partial update. The row must exist before the form is looked at; a form
/// that fails validation leaves the row untouched.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    let current = state.store.find(id).await?.ok_or(AppError::NotFound)?;

    let form = form_data(payload)?;
    let patch = validate_patch(&form)?;
    let todo = patch.apply_to(&current);
    validate_todo(&todo)?;

    // Deleted between the lookup and the write.
    if !state.store.save(&todo).await? {
        return Err(AppError::NotFound);
    }
    info!(id, completed = todo.completed, "todo updated");
    Ok(Json(TodoResponse {
        todo,
        message: Some(MSG_UPDATED.to_string()),
    }))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    info!(id, "todo deleted");
    Ok(Json(MessageResponse {
        message: MSG_DELETED.to_string(),
    }))
}

/// Unwrap the form from the request body. Unparseable bodies become
/// form-level validation errors instead of the extractor's own rejection.
fn form_data(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    let Json(body) = payload.map_err(|rejection| FieldErrors::non_field(rejection.body_text()))?;
    Ok(match body {
        Value::Object(mut fields) => match fields.remove(FORM_DATA) {
            Some(form) => form,
            None => Value::Object(fields),
        },
        other => other,
    })
}
