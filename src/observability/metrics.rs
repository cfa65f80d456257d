//! Metrics collection and exposition.
//!
//! # Metrics
//! - `facade_requests_total` (counter): local requests by method, route, status
//! - `facade_request_duration_seconds` (histogram): local request latency
//! - `upstream_calls_total` (counter): upstream calls by operation, outcome
//! - `upstream_call_duration_seconds` (histogram): upstream round-trip latency
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus exporter.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled local request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "facade_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "facade_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call and how it ended.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!("upstream_calls_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("upstream_call_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Route-level middleware feeding `record_request`.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
