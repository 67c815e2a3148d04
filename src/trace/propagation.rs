//! Trace context propagation over HTTP header carriers.
//!
//! # Responsibilities
//! - Extract a `TraceContext` from inbound headers
//! - Inject a `TraceContext` into outbound headers
//!
//! # Design Decisions
//! - `Propagator` is a trait object seam: the B3 multi-header format is the
//!   reference implementation, alternates slot in without touching callers
//! - Extract and inject compose: extracting injected headers preserves the
//!   trace ID and records the injected span as the parent of the new hop
//! - Missing or malformed fields degrade to a fresh root context

use axum::http::{HeaderMap, HeaderValue};

use crate::trace::context::{is_valid_hex_id, TraceContext};

pub const B3_TRACE_ID_HEADER: &str = "x-b3-traceid";
pub const B3_SPAN_ID_HEADER: &str = "x-b3-spanid";
pub const B3_PARENT_SPAN_ID_HEADER: &str = "x-b3-parentspanid";
pub const B3_SAMPLED_HEADER: &str = "x-b3-sampled";

/// Pluggable trace-context wire format.
pub trait Propagator: Send + Sync {
    /// Read the wire-format fields from `carrier`. Missing or malformed
    /// fields produce a fresh root context, never an error.
    fn extract(&self, carrier: &HeaderMap) -> TraceContext;

    /// Write the wire-format fields for `ctx` into `carrier`, overwriting
    /// existing values for those names.
    fn inject(&self, ctx: &TraceContext, carrier: &mut HeaderMap);

    /// Header names this format writes, for diagnostics.
    fn field_names(&self) -> &'static [&'static str];
}

/// B3 multi-header propagation (`x-b3-*`).
#[derive(Debug, Default, Clone)]
pub struct B3MultiPropagator;

impl B3MultiPropagator {
    pub fn new() -> Self {
        Self
    }
}

impl Propagator for B3MultiPropagator {
    fn extract(&self, carrier: &HeaderMap) -> TraceContext {
        let trace_id = header_str(carrier, B3_TRACE_ID_HEADER);
        let span_id = header_str(carrier, B3_SPAN_ID_HEADER);

        // Trace IDs come in 64- or 128-bit flavors; span IDs are 64-bit.
        let (Some(trace_id), Some(span_id)) = (trace_id, span_id) else {
            return TraceContext::new_root();
        };
        if !is_valid_hex_id(trace_id, &[16, 32]) || !is_valid_hex_id(span_id, &[16]) {
            return TraceContext::new_root();
        }

        let sampled = match header_str(carrier, B3_SAMPLED_HEADER) {
            Some("0") | Some("false") => false,
            // Absent flag means the decision is deferred; keep recording.
            _ => true,
        };

        // An inbound x-b3-parentspanid names the caller's own parent, two
        // hops up. This hop re-parents onto the caller's span, so the
        // grandparent ID is consumed but not carried forward.
        let _ = header_str(carrier, B3_PARENT_SPAN_ID_HEADER);

        TraceContext::continue_from(
            trace_id.to_ascii_lowercase(),
            span_id.to_ascii_lowercase(),
            sampled,
        )
    }

    fn inject(&self, ctx: &TraceContext, carrier: &mut HeaderMap) {
        set(carrier, B3_TRACE_ID_HEADER, &ctx.trace_id);
        set(carrier, B3_SPAN_ID_HEADER, &ctx.span_id);
        match &ctx.parent_span_id {
            Some(parent) => set(carrier, B3_PARENT_SPAN_ID_HEADER, parent),
            None => {
                carrier.remove(B3_PARENT_SPAN_ID_HEADER);
            }
        }
        set(carrier, B3_SAMPLED_HEADER, if ctx.sampled { "1" } else { "0" });
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            B3_TRACE_ID_HEADER,
            B3_SPAN_ID_HEADER,
            B3_PARENT_SPAN_ID_HEADER,
            B3_SAMPLED_HEADER,
        ]
    }
}

fn header_str<'a>(carrier: &'a HeaderMap, name: &str) -> Option<&'a str> {
    carrier.get(name).and_then(|v| v.to_str().ok())
}

fn set(carrier: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        carrier.insert(name, value);
    }
}
