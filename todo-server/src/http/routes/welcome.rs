//! `GET /` - static service description

use axum::extract::OriginalUri;
use axum::http::Method;
use axum::{routing::get, Router};

use super::log_request;
use crate::envelope::{Envelope, Payload, Welcome};

/// Welcome message for the database-less boilerplate server
pub const BOILERPLATE_BANNER: &str = "This is a minimal boilerplate server.";

async fn welcome(banner: &'static str, method: Method, uri: OriginalUri) -> Envelope {
    log_request(&method, &uri.0);
    Envelope::ok(banner, Payload::Welcome(Welcome::default()))
}

/// Welcome route with the given banner as the envelope message
pub fn router<S>(banner: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/",
        get(move |method: Method, uri: OriginalUri| welcome(banner, method, uri)),
    )
}
