//! Per-request spans.
//!
//! Every request runs inside a span carrying its method, URI and the
//! `x-request-id` assigned by [`crate::http::request`].

use axum::extract::Request;
use tracing::Span;

use crate::http::request::X_REQUEST_ID;

/// Span factory for tower-http's `TraceLayer`.
pub fn make_request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
