//! CloudEvents envelope subsystem.
//!
//! # Data Flow
//! ```text
//! inbound HTTP headers
//!     → headers.rs (extract canonical ce-* values, empty-string defaults)
//!     → InboundEventHeaders (immutable per request)
//!     → envelope.rs (build outbound envelope, sniff data content type)
//!     → publisher.rs (POST data to broker, inject trace headers,
//!       classify outcome)
//! ```
//!
//! # Design Decisions
//! - Missing inbound headers are not errors; they degrade to empty strings
//!   so partial or hand-built test events still reach the user function
//! - The envelope's content type is computed once at construction and never
//!   re-derived
//! - Publish has no built-in retry; failures are returned to the caller

pub mod envelope;
pub mod headers;
pub mod publisher;

pub use envelope::EventEnvelope;
pub use headers::InboundEventHeaders;
pub use publisher::{EventPublisher, PublishError};
