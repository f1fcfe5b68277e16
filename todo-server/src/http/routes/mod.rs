//! Route handlers organized by resource

pub mod fallback;
pub mod tables;
pub mod todos;
pub mod welcome;

use axum::http::{Method, Uri};

/// Every handler logs the inbound method and route before doing work.
pub(crate) fn log_request(method: &Method, uri: &Uri) {
    tracing::info!(method = %method, route = %original_url(uri), "Handling request");
}

/// Path plus query string, as the client sent it
pub(crate) fn original_url(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}
