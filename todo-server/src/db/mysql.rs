//! MySQL store adapter
//!
//! MySQL has no `RETURNING`, so create reads the row back by the generated id.
//!
//! `created_at` is a MySQL `TIMESTAMP`, which sqlx only decodes into a zoned
//! `DateTime`. Rows are read as [`MySqlTodoRow`] and converted to [`Todo`]
//! with the UTC wall-clock time (sqlx pins the session `time_zone` to UTC).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};

use super::catalog::mysql as sql;
use super::{DbError, Dialect, QueryResult, TodoStore};
use crate::models::Todo;

/// Decoded type of the `created_at TIMESTAMP` column
type CreatedAt = DateTime<Utc>;

/// One `todos` row as MySQL hands it back
#[derive(Debug, Clone, FromRow)]
struct MySqlTodoRow {
    id: i64,
    title: String,
    completed: bool,
    created_at: CreatedAt,
}

impl From<MySqlTodoRow> for Todo {
    fn from(row: MySqlTodoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            completed: row.completed,
            created_at: row.created_at.naive_utc(),
        }
    }
}

/// Todo store over a MySQL pool
#[derive(Clone)]
pub struct MySqlTodoStore {
    pool: MySqlPool,
}

impl MySqlTodoStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for MySqlTodoStore {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    async fn list(&self) -> Result<QueryResult, DbError> {
        let rows = sqlx::query_as::<_, MySqlTodoRow>(sql::SELECT_TODOS)
            .fetch_all(&self.pool)
            .await?;
        Ok(QueryResult::fetched(rows.into_iter().map(Todo::from).collect()))
    }

    async fn get(&self, id: i64) -> Result<QueryResult, DbError> {
        let row = sqlx::query_as::<_, MySqlTodoRow>(sql::SELECT_TODO)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(QueryResult::fetched(row.into_iter().map(Todo::from).collect()))
    }

    async fn create(&self, title: &str) -> Result<QueryResult, DbError> {
        let done = sqlx::query(sql::CREATE_TODO)
            .bind(title)
            .execute(&self.pool)
            .await?;
        let id = done.last_insert_id() as i64;

        let row = sqlx::query_as::<_, MySqlTodoRow>(sql::SELECT_TODO)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(QueryResult {
            rows: row.into_iter().map(Todo::from).collect(),
            affected: done.rows_affected(),
        })
    }

    async fn update(&self, id: i64, title: &str, completed: bool) -> Result<QueryResult, DbError> {
        // sqlx negotiates CLIENT_FOUND_ROWS, so matched-but-unchanged rows count
        let done = sqlx::query(sql::UPDATE_TODO)
            .bind(title)
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(QueryResult::written(done.rows_affected()))
    }

    async fn delete(&self, id: i64) -> Result<QueryResult, DbError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, MySqlTodoRow>(sql::LOCK_TODO)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(todo) = existing else {
            tx.rollback().await?;
            return Ok(QueryResult::default());
        };

        let done = sqlx::query(sql::DELETE_TODO)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(QueryResult {
            rows: vec![todo.into()],
            affected: done.rows_affected(),
        })
    }
}
