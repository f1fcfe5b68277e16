//! Domain models and request bodies

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted todo row.
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

/// POST /api/v1/ body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// PUT /api/v1/{id} body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    pub completed: bool,
}

/// Result of an update: the path id merged with the fields that were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedTodo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl UpdatedTodo {
    pub fn merge(id: i64, update: UpdateTodo) -> Self {
        Self {
            id,
            title: update.title,
            completed: update.completed,
        }
    }
}

/// One row of `pg_catalog.pg_tables`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TableInfo {
    pub schemaname: String,
    pub tablename: String,
    pub tableowner: String,
    pub tablespace: Option<String>,
    pub hasindexes: bool,
    pub hasrules: bool,
    pub hastriggers: bool,
}
