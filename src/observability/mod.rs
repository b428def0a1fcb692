//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup, resolver and HTTP handler produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (request counters, latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout/stderr, text or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing, filter overridable with RUST_LOG
//! - Request ID recorded on every handler log line
//! - Metrics are cheap (atomic increments) and no-ops without an exporter

pub mod logging;
pub mod metrics;
