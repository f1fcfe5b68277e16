//! Database connection pool management
//!
//! Uses sqlx pools with explicit connection limits taken from
//! `DB_CONNECTION_LIMIT`. The pool hands each checked-out connection to a
//! single caller at a time.

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::DbConfig;

/// Connect options for Postgres from discrete config fields.
pub fn pg_connect_options(config: &DbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

/// Connect options for MySQL from discrete config fields.
pub fn mysql_connect_options(config: &DbConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pg_pool(&DbConfig::from_env()?).await?;
/// ```
pub async fn create_pg_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(pg_connect_options(config))
        .await
}

/// Create a MySQL connection pool.
pub async fn create_mysql_pool(config: &DbConfig) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(mysql_connect_options(config))
        .await
}
