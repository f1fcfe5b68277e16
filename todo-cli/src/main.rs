//! todoctl - run the todo REST API
//!
//! - `serve`: the todo API over Postgres, MySQL or an in-memory store
//! - `hello`: the minimal boilerplate server
//! - `tables`: Postgres table administration

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "REST CRUD server for todos over Postgres or MySQL"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the todo API server
    Serve(commands::serve::ServeArgs),
    /// Run the boilerplate server (welcome route only)
    Hello(commands::hello::HelloArgs),
    /// Postgres table administration (list, create)
    Tables(commands::tables::TablesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Hello(args) => commands::hello::run_hello(args).await,
        Commands::Tables(args) => commands::tables::run_tables(args).await,
    }
}
