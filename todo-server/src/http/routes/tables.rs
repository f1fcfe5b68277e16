//! Table administration (Postgres only)
//!
//! Mounted only when the store's dialect supports it.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::get,
    Router,
};

use super::log_request;
use crate::envelope::{Envelope, Payload};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /api/v1/tables - rows of `pg_catalog.pg_tables`
async fn list_tables(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Result<Envelope, ApiError> {
    log_request(&method, &uri);
    let tables = state.store().list_tables().await?;

    Ok(Envelope::ok(
        "All the tables in the database.",
        Payload::Tables {
            count: tables.len(),
            tables,
        },
    ))
}

/// POST /api/v1/tables - create the todos table
async fn create_table(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Result<Envelope, ApiError> {
    log_request(&method, &uri);
    state.store().create_table().await?;

    Ok(Envelope::created(
        "Table created successfully.",
        Payload::Table {
            table: "todos".into(),
        },
    ))
}

/// Table administration routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/v1/tables", get(list_tables).post(create_table))
}
