//! In-process todo store
//!
//! Same ordering, row cap and affected-row semantics as the SQL adapters.
//! Used for running the server without a database and by the router tests.
//! The `dialect` it reports decides which dialect-specific behaviour the
//! handlers apply.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use tokio::sync::RwLock;

use super::catalog::LIST_LIMIT;
use super::{DbError, Dialect, QueryResult, TodoStore};
use crate::models::{TableInfo, Todo};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    todos: Vec<Todo>,
}

/// Todo store backed by a `Vec` behind an async lock
#[derive(Debug)]
pub struct MemoryStore {
    dialect: Dialect,
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            state: RwLock::new(MemoryState::default()),
        }
    }

    /// Start with existing rows; new ids continue after the largest one.
    pub fn seeded(dialect: Dialect, todos: Vec<Todo>) -> Self {
        let last_id = todos.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            dialect,
            state: RwLock::new(MemoryState { last_id, todos }),
        }
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn list(&self) -> Result<QueryResult, DbError> {
        let state = self.state.read().await;
        let mut rows = state.todos.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(LIST_LIMIT);
        Ok(QueryResult::fetched(rows))
    }

    async fn get(&self, id: i64) -> Result<QueryResult, DbError> {
        let state = self.state.read().await;
        let row = state.todos.iter().find(|t| t.id == id).cloned();
        Ok(QueryResult::fetched(row.into_iter().collect()))
    }

    async fn create(&self, title: &str) -> Result<QueryResult, DbError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let todo = Todo {
            id: state.last_id,
            title: title.to_owned(),
            completed: false,
            created_at: Self::now(),
        };
        state.todos.push(todo.clone());
        Ok(QueryResult {
            rows: vec![todo],
            affected: 1,
        })
    }

    async fn update(&self, id: i64, title: &str, completed: bool) -> Result<QueryResult, DbError> {
        let mut state = self.state.write().await;
        let affected = match state.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.title = title.to_owned();
                todo.completed = completed;
                1
            }
            None => 0,
        };
        Ok(QueryResult::written(affected))
    }

    async fn delete(&self, id: i64) -> Result<QueryResult, DbError> {
        let mut state = self.state.write().await;
        match state.todos.iter().position(|t| t.id == id) {
            Some(index) => {
                let todo = state.todos.remove(index);
                Ok(QueryResult {
                    rows: vec![todo],
                    affected: 1,
                })
            }
            None => Ok(QueryResult::default()),
        }
    }

    async fn list_tables(&self) -> Result<Vec<TableInfo>, DbError> {
        if !self.dialect.supports_admin() {
            return Err(DbError::Unsupported {
                operation: "list tables",
                dialect: self.dialect,
            });
        }
        Ok(vec![TableInfo {
            schemaname: "public".into(),
            tablename: "todos".into(),
            tableowner: "memory".into(),
            tablespace: None,
            hasindexes: true,
            hasrules: false,
            hastriggers: false,
        }])
    }

    async fn create_table(&self) -> Result<(), DbError> {
        if !self.dialect.supports_admin() {
            return Err(DbError::Unsupported {
                operation: "create table",
                dialect: self.dialect,
            });
        }
        // The single table always exists, as after a first CREATE TABLE
        Err(DbError::Store(r#"relation "todos" already exists"#.into()))
    }
}
