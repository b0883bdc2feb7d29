//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_requests_total` (counter): requests by outcome (`matched`, `not_found`)
//! - `dispatch_request_duration_seconds` (histogram): time spent in dispatch, by outcome
//! - `dispatch_routes_registered` (gauge): entries currently in the dispatch table
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op, so tests need no setup
//! - Prometheus exposition is opt-in via configuration

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Outcome label for a request that reached a handler.
pub const OUTCOME_MATCHED: &str = "matched";
/// Outcome label for a request answered with 404.
pub const OUTCOME_NOT_FOUND: &str = "not_found";

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one dispatched request.
pub fn record_dispatch(outcome: &'static str, start: Instant) {
    metrics::counter!("dispatch_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("dispatch_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current size of the dispatch table.
pub fn record_routes_registered(count: usize) {
    metrics::gauge!("dispatch_routes_registered").set(count as f64);
}
