//! Distributed tracing subsystem.
//!
//! # Data Flow
//! ```text
//! inbound headers
//!     → propagation.rs (extract wire format → TraceContext)
//!     → tracer.rs (server span, closed on every exit path)
//!     → publisher outbound headers (inject wire format)
//! ```
//!
//! # Design Decisions
//! - The wire format sits behind the `Propagator` trait so alternate
//!   formats (W3C traceparent, Jaeger) can replace B3 without touching
//!   call sites
//! - One propagation format is active process-wide, chosen at startup
//! - Tracer and propagator are constructed explicitly and passed by
//!   reference; there is no global SDK singleton
//! - Malformed inbound trace headers start a fresh root trace instead of
//!   failing the request

pub mod context;
pub mod propagation;
pub mod tracer;

pub use context::TraceContext;
pub use propagation::{B3MultiPropagator, Propagator};
pub use tracer::{LogTracer, SpanGuard, SpanKind, Tracer};
