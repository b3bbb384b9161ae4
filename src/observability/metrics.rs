//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bootstrap_connect_attempts_total` (counter): transport attempts by resource, outcome
//! - `bootstrap_handler_outcomes_total` (counter): handler results by handler, outcome
//! - `bootstrap_handler_duration_seconds` (histogram): time from launch to report
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Failure reasons are labelled with `BootstrapError::kind`

use std::net::SocketAddr;
use std::time::Duration;

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_connect_attempt(resource: &str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(
        "bootstrap_connect_attempts_total",
        "resource" => resource.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a handler's final result. `failure` is the error kind, if any.
pub fn record_handler_outcome(handler: &str, failure: Option<&'static str>, elapsed: Duration) {
    counter!(
        "bootstrap_handler_outcomes_total",
        "handler" => handler.to_string(),
        "outcome" => failure.unwrap_or("success")
    )
    .increment(1);
    histogram!("bootstrap_handler_duration_seconds", "handler" => handler.to_string())
        .record(elapsed.as_secs_f64());
}
