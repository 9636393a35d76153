//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_contexts_created_total` (counter): session contexts built
//! - `edge_body_read_failures_total` (counter): recovered body reads, by `kind`
//! - `edge_request_body_bytes` (histogram): buffered request body sizes
//! - `edge_responses_written_total` (counter): writer outcomes, by `outcome`
//! - `edge_request_duration_seconds` (histogram): create → write latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_context_created() {
    counter!("edge_contexts_created_total").increment(1);
}

pub fn record_body_read_failure(kind: &'static str) {
    counter!("edge_body_read_failures_total", "kind" => kind).increment(1);
}

pub fn record_body_size(bytes: usize) {
    histogram!("edge_request_body_bytes").record(bytes as f64);
}

pub fn record_response_written(outcome: &'static str) {
    counter!("edge_responses_written_total", "outcome" => outcome).increment(1);
}

pub fn record_request_duration(method: &str, status: u16, start: Instant) {
    histogram!(
        "edge_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
