//! Postgres table administration from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use todo_server::db::{create_pg_pool, PgTodoStore, TodoStore};
use todo_server::DbConfig;

#[derive(Parser, Debug)]
pub struct TablesArgs {
    #[command(subcommand)]
    pub command: TablesCommand,
}

#[derive(Subcommand, Debug)]
pub enum TablesCommand {
    /// List tables from pg_catalog as JSON
    List,
    /// Create the todos table
    Create,
}

pub async fn run_tables(args: TablesArgs) -> Result<()> {
    let config = DbConfig::from_env().context("Database configuration incomplete")?;
    let pool = create_pg_pool(&config)
        .await
        .context("Failed to create database pool")?;
    let store = PgTodoStore::new(pool);

    match args.command {
        TablesCommand::List => {
            let tables = store.list_tables().await.context("Failed to list tables")?;
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }
        TablesCommand::Create => {
            store.create_table().await.context("Failed to create table")?;
            println!("Table created successfully.");
        }
    }

    Ok(())
}
