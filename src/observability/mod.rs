//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher + publisher produce:
//!     → logging.rs (structured log events, trace/span IDs as fields)
//!     → metrics.rs (invocation and publish counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging via `tracing`; level from config or RUST_LOG
//! - Metrics are cheap (atomic increments) and off the request's hot error
//!   paths
//! - The metrics endpoint is disabled by default

pub mod logging;
pub mod metrics;
