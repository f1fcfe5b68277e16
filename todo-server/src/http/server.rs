//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS by default, localhost-only on request
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::TodoStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3002)
    pub bind_addr: SocketAddr,

    /// Allow any origin (default: true). When false only localhost origins
    /// are allowed.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3002)),
            cors_permissive: true,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the todo API router for the store's dialect.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let dialect = state.store().dialect();

    let mut app: Router<Arc<AppState>> = Router::new()
        .merge(routes::welcome::router(dialect.banner()))
        .merge(routes::todos::router());

    if dialect.supports_admin() {
        app = app.merge(routes::tables::router());
    }

    app.fallback(routes::fallback::not_found)
        .method_not_allowed_fallback(routes::fallback::not_found)
        .layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Build the boilerplate router: welcome route and catch-all, no database.
pub fn build_hello_router(config: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::welcome::router(routes::welcome::BOILERPLATE_BANNER))
        .fallback(routes::fallback::not_found)
        .method_not_allowed_fallback(routes::fallback::not_found)
        .layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http())
}

/// Run the todo API server.
///
/// # Example
///
/// ```ignore
/// let store = db::connect(Dialect::Postgres, &DbConfig::from_env()?).await?;
/// run_server(AppState::new(store), ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let dialect = state.store().dialect();
    let app = build_router(state, &config);

    tracing::info!(dialect = %dialect, "Todo API ready");
    serve(app, config.bind_addr).await
}

/// Run the boilerplate server.
pub async fn run_hello_server(config: ServerConfig) -> Result<(), ServerError> {
    let app = build_hello_router(&config);
    serve(app, config.bind_addr).await
}

async fn serve(app: Router, bind_addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);
    tracing::info!("Local: http://127.0.0.1:{}", bind_addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Failure while binding or serving. Config and pool errors surface before
/// the server starts and stay with their own types.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
