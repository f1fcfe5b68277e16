//! HTTP server layer
//!
//! Axum server with:
//! - CORS (permissive by default)
//! - Request tracing
//! - Graceful shutdown
//! - Envelope responses for every route, including the 404 catch-all

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{
    build_hello_router, build_router, run_hello_server, run_server, AppState, ServerConfig,
    ServerError,
};
