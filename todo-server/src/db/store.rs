//! The store contract shared by every dialect

use async_trait::async_trait;

use super::Dialect;
use crate::models::{TableInfo, Todo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{operation} is not supported by the {dialect} store")]
    Unsupported {
        operation: &'static str,
        dialect: Dialect,
    },

    /// Failure raised by a non-SQL store
    #[error("{0}")]
    Store(String),
}

/// Uniform result of one store operation.
///
/// `rows` holds whatever the statement produced (or, for delete, the row that
/// was removed); `affected` is the number of rows written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub rows: Vec<Todo>,
    pub affected: u64,
}

impl QueryResult {
    /// Result of a read
    pub fn fetched(rows: Vec<Todo>) -> Self {
        Self { rows, affected: 0 }
    }

    /// Result of a write that returns no rows
    pub fn written(affected: u64) -> Self {
        Self {
            rows: Vec::new(),
            affected,
        }
    }

    pub fn into_first(self) -> Option<Todo> {
        self.rows.into_iter().next()
    }
}

/// Async todo storage.
///
/// Implementations run the fixed catalog statements for their dialect and
/// may be called concurrently from any number of requests.
#[async_trait]
pub trait TodoStore: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Up to 100 todos, newest first.
    async fn list(&self) -> Result<QueryResult, DbError>;

    /// Zero or one todo.
    async fn get(&self, id: i64) -> Result<QueryResult, DbError>;

    /// Insert with defaults for `completed` and `created_at`; `rows` holds the
    /// stored todo.
    async fn create(&self, title: &str) -> Result<QueryResult, DbError>;

    /// Overwrite `title` and `completed`. `affected == 0` means no such id.
    async fn update(&self, id: i64, title: &str, completed: bool) -> Result<QueryResult, DbError>;

    /// Check-then-delete in one transaction. `rows` holds the removed todo,
    /// empty when the id did not exist.
    async fn delete(&self, id: i64) -> Result<QueryResult, DbError>;

    async fn list_tables(&self) -> Result<Vec<TableInfo>, DbError> {
        Err(DbError::Unsupported {
            operation: "list tables",
            dialect: self.dialect(),
        })
    }

    async fn create_table(&self) -> Result<(), DbError> {
        Err(DbError::Unsupported {
            operation: "create table",
            dialect: self.dialect(),
        })
    }
}
