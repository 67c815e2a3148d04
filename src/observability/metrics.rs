//! Metrics collection and exposition.
//!
//! # Metrics
//! - `function_invocations_total` (counter): invocations by method, status
//! - `function_invocation_duration_seconds` (histogram): latency
//! - `event_publish_total` (counter): publish attempts by outcome
//!
//! # Design Decisions
//! - `metrics` facade throughout; recording without an installed exporter
//!   is a no-op, so tests need no setup
//! - Prometheus exposition is opt-in via config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one user-function invocation.
pub fn record_invocation(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "function_invocations_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("function_invocation_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record one publish attempt.
pub fn record_publish(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("event_publish_total", "outcome" => outcome).increment(1);
}
