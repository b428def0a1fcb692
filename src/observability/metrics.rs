//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vanityurl_requests_total` (counter): total requests by status
//! - `vanityurl_request_duration_seconds` (histogram): handler latency
//!
//! Without an installed exporter the macros record nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a handled request.
pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("vanityurl_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("vanityurl_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
