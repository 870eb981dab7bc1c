//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_requests_total` (counter): calls by JSON-RPC method, HTTP status, outcome
//! - `rpc_request_duration_seconds` (histogram): intake + dispatch latency
//! - `rpc_rejections_total` (counter): intake rejections by reason
//!
//! Unknown and rejected method names are folded into fixed labels to keep
//! cardinality bounded.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed call.
pub fn record_request(method: &str, status: u16, outcome: &'static str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();

    counter!(
        "rpc_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        "rpc_request_duration_seconds",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .record(elapsed);
}

/// Record a call turned away by intake.
pub fn record_rejection(reason: &'static str) {
    counter!("rpc_rejections_total", "reason" => reason).increment(1);
}
