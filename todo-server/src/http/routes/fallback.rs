//! Catch-all for unmatched routes and methods

use axum::extract::OriginalUri;
use axum::http::Method;

use super::{log_request, original_url};
use crate::envelope::Envelope;

/// 404 envelope naming the requested route
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> Envelope {
    log_request(&method, &uri);
    Envelope::not_found(format!(
        "Route '{}' does not exists on the server.",
        original_url(&uri)
    ))
}
