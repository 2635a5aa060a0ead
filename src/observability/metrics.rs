//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by route, method, status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_upstream_errors_total` (counter): node failures by operation
//! - `gateway_node_health` (gauge): 1=reachable, 0=unreachable

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Initialize the Prometheus exporter with its own HTTP listener.
///
/// Must be called inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a node call that failed on every provider.
pub fn record_upstream_error(operation: &'static str) {
    metrics::counter!("gateway_upstream_errors_total", "operation" => operation).increment(1);
}

/// Record the outcome of a node health probe.
pub fn record_node_health(healthy: bool) {
    metrics::gauge!("gateway_node_health").set(if healthy { 1.0 } else { 0.0 });
}

/// Route template for the request, or `unmatched` when only the fallback
/// answered it.
pub fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Middleware recording request count and latency per route, fallbacks included.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = route_label(&request);
    let method = request.method().to_string();

    let response = next.run(request).await;
    record_request(&route, &method, response.status().as_u16(), start);
    response
}
