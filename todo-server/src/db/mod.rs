//! Database layer - pool, query catalog and store adapters
//!
//! # Design Principles
//!
//! - One pool per process, built from explicit config and injected into state
//! - Fixed statement text per dialect, parameters always bound separately
//! - Handlers see one result shape ([`QueryResult`]) regardless of dialect
//! - Delete runs its existence check and the delete in one transaction

pub mod catalog;
pub mod memory;
pub mod mysql;
pub mod pool;
pub mod postgres;
pub mod store;

use std::fmt;
use std::sync::Arc;

pub use memory::MemoryStore;
pub use mysql::MySqlTodoStore;
pub use pool::{create_mysql_pool, create_pg_pool};
pub use postgres::PgTodoStore;
pub use store::{DbError, QueryResult, TodoStore};

use crate::config::DbConfig;

/// Backing store SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `$n` placeholders, `RETURNING` on insert
    Postgres,
    /// `?` placeholders, insert followed by a select of the generated id
    MySql,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
        }
    }

    /// Listener port used when `PORT` is not set
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Postgres => 3002,
            Self::MySql => 3001,
        }
    }

    /// Whether the table administration routes are mounted
    pub fn supports_admin(&self) -> bool {
        matches!(self, Self::Postgres)
    }

    /// Message served by `GET /`
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Postgres => "This is the backend server for POSTGRES database server.",
            Self::MySql => "This is the backend server for MYSQL database server.",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the pool for `dialect` and wrap it in the matching store.
///
/// Fails if the first connection cannot be established.
pub async fn connect(dialect: Dialect, config: &DbConfig) -> Result<Arc<dyn TodoStore>, DbError> {
    tracing::info!(
        dialect = %dialect,
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections = config.max_connections,
        "Connecting to database"
    );

    let store: Arc<dyn TodoStore> = match dialect {
        Dialect::Postgres => Arc::new(PgTodoStore::new(create_pg_pool(config).await?)),
        Dialect::MySql => Arc::new(MySqlTodoStore::new(create_mysql_pool(config).await?)),
    };
    Ok(store)
}
