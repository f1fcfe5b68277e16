//! Postgres store adapter

use async_trait::async_trait;
use sqlx::PgPool;

use super::catalog::postgres as sql;
use super::{DbError, Dialect, QueryResult, TodoStore};
use crate::models::{TableInfo, Todo};

/// Todo store over a Postgres pool
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn list(&self) -> Result<QueryResult, DbError> {
        let rows = sqlx::query_as::<_, Todo>(sql::SELECT_TODOS)
            .fetch_all(&self.pool)
            .await?;
        Ok(QueryResult::fetched(rows))
    }

    async fn get(&self, id: i64) -> Result<QueryResult, DbError> {
        let row = sqlx::query_as::<_, Todo>(sql::SELECT_TODO)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(QueryResult::fetched(row.into_iter().collect()))
    }

    async fn create(&self, title: &str) -> Result<QueryResult, DbError> {
        let todo = sqlx::query_as::<_, Todo>(sql::CREATE_TODO)
            .bind(title)
            .fetch_one(&self.pool)
            .await?;
        Ok(QueryResult {
            rows: vec![todo],
            affected: 1,
        })
    }

    async fn update(&self, id: i64, title: &str, completed: bool) -> Result<QueryResult, DbError> {
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

        let existing = sqlx::query_as::<_, Todo>(sql::LOCK_TODO)
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
            rows: vec![todo],
            affected: done.rows_affected(),
        })
    }

    async fn list_tables(&self) -> Result<Vec<TableInfo>, DbError> {
        let tables = sqlx::query_as::<_, TableInfo>(sql::SHOW_TABLES)
            .fetch_all(&self.pool)
            .await?;
        Ok(tables)
    }

    async fn create_table(&self) -> Result<(), DbError> {
        sqlx::query(sql::CREATE_TABLE).execute(&self.pool).await?;
        tracing::info!("Created todos table");
        Ok(())
    }
}
