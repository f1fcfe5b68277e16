//! HTTP server command for the todo API

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use todo_server::db::{self, MemoryStore, TodoStore};
use todo_server::{run_server, AppState, DbConfig, Dialect, ServerConfig};

/// Which store the server talks to
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Mysql,
    /// In-process store, no database needed (see --memory-dialect)
    Memory,
}

/// Dialect behaviour reproduced by the in-memory store
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryDialect {
    Postgres,
    Mysql,
}

impl From<MemoryDialect> for Dialect {
    fn from(dialect: MemoryDialect) -> Self {
        match dialect {
            MemoryDialect::Postgres => Dialect::Postgres,
            MemoryDialect::Mysql => Dialect::MySql,
        }
    }
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Backing store
    #[arg(long, short = 'd', value_enum, env = "TODO_DIALECT", default_value = "postgres")]
    pub dialect: Backend,

    /// Dialect the in-memory store behaves as (only with --dialect memory)
    #[arg(long, value_enum, env = "TODO_MEMORY_DIALECT", default_value = "postgres")]
    pub memory_dialect: MemoryDialect,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on (default: 3002 for postgres, 3001 for mysql)
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    /// Only allow localhost origins instead of any origin
    #[arg(long)]
    pub cors_local_only: bool,
}

impl ServeArgs {
    /// Dialect the server runs with
    fn store_dialect(&self) -> Dialect {
        match self.dialect {
            Backend::Postgres => Dialect::Postgres,
            Backend::Mysql => Dialect::MySql,
            Backend::Memory => self.memory_dialect.into(),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let dialect = args.store_dialect();

    let store: Arc<dyn TodoStore> = match args.dialect {
        Backend::Memory => {
            tracing::warn!(dialect = %dialect, "Using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new(dialect))
        }
        Backend::Postgres | Backend::Mysql => {
            let config = DbConfig::from_env().context("Database configuration incomplete")?;
            db::connect(dialect, &config)
                .await
                .context("Failed to create database pool")?
        }
    };

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port.unwrap_or(dialect.default_port())),
        cors_permissive: !args.cors_local_only,
    };

    tracing::info!("Starting todo server on {}", config.bind_addr);
    run_server(AppState::new(store), config)
        .await
        .context("Server error")?;

    Ok(())
}
