//! Minimal boilerplate server: welcome route and 404 catch-all

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use todo_server::http::run_hello_server;
use todo_server::ServerConfig;

const DEFAULT_PORT: u16 = 3003;

#[derive(Parser, Debug)]
pub struct HelloArgs {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

pub async fn run_hello(args: HelloArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        ..ServerConfig::default()
    };

    tracing::info!("Starting boilerplate server on {}", config.bind_addr);
    run_hello_server(config).await.context("Server error")
}
