//! Todo CRUD endpoints under `/api/v1/`

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::get,
    Router,
};

use super::log_request;
use crate::db::Dialect;
use crate::envelope::{Envelope, Payload};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, TodoId};
use crate::http::server::AppState;
use crate::models::{CreateTodo, UpdateTodo, UpdatedTodo};

/// GET /api/v1/ - newest 100 todos
async fn list_todos(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Result<Envelope, ApiError> {
    log_request(&method, &uri);
    let result = state.store().list().await?;

    Ok(Envelope::ok(
        "All the todos that are in the database",
        Payload::Todos { todos: result.rows },
    ))
}

/// GET /api/v1/{id} - a single todo
async fn get_todo(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    todo_id: TodoId,
) -> Result<Envelope, ApiError> {
    log_request(&method, &uri);
    let Some(id) = todo_id.id else {
        return Err(ApiError::todo_not_found(&todo_id.raw));
    };

    let todo = state
        .store()
        .get(id)
        .await?
        .into_first()
        .ok_or_else(|| ApiError::todo_not_found(&todo_id.raw))?;

    Ok(Envelope::ok("Todo retrieved.", Payload::Todo { todo }))
}

/// POST /api/v1/ - create from `{title}`
async fn create_todo(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    JsonBody(req): JsonBody<CreateTodo>,
) -> Result<Envelope, ApiError> {
    log_request(&method, &uri);
    let todo = state
        .store()
        .create(&req.title)
        .await?
        .into_first()
        .ok_or_else(|| ApiError::Internal {
            message: "Todo was inserted but could not be read back.".into(),
        })?;

    tracing::debug!(id = todo.id, "Todo created");
    Ok(Envelope::created("Todo created", Payload::Todo { todo }))
}

/// PUT /api/v1/{id} - overwrite `title` and `completed`
async fn update_todo(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    todo_id: TodoId,
    JsonBody(req): JsonBody<UpdateTodo>,
) -> Result<Envelope, ApiError> {
    log_request(&method, &uri);
    let Some(id) = todo_id.id else {
        return Err(ApiError::todo_not_found(&todo_id.raw));
    };

    let result = state.store().update(id, &req.title, req.completed).await?;
    if result.affected == 0 {
        return Err(ApiError::todo_not_found(&todo_id.raw));
    }

    Ok(Envelope::ok(
        "todo updated",
        Payload::Updated(UpdatedTodo::merge(id, req)),
    ))
}

/// DELETE /api/v1/{id} - remove and return the todo
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    todo_id: TodoId,
) -> Result<Envelope, ApiError> {
    log_request(&method, &uri);
    let dialect = state.store().dialect();
    let Some(id) = todo_id.id else {
        return Err(missing_on_delete(dialect, &todo_id.raw));
    };

    let todo = state
        .store()
        .delete(id)
        .await?
        .into_first()
        .ok_or_else(|| missing_on_delete(dialect, &todo_id.raw))?;

    Ok(Envelope::ok("Todo deleted", Payload::Todo { todo }))
}

/// Postgres reports a missing delete target as a 500, MySQL as a 404.
fn missing_on_delete(dialect: Dialect, id: &str) -> ApiError {
    match dialect {
        Dialect::Postgres => ApiError::Internal {
            message: format!("There's no such todo of id {}", id),
        },
        Dialect::MySql => ApiError::NotFound {
            message: format!("Todo by id {} was not found", id),
        },
    }
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/", get(list_todos).post(create_todo))
        .route(
            "/api/v1/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
