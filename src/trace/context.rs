//! Trace context representation.
//!
//! # Responsibilities
//! - Carry trace ID, span ID, parent span ID and sampling decision
//! - Generate fresh root contexts and child hops
//!
//! # Design Decisions
//! - IDs are lowercase hex strings (64-bit span IDs, 128-bit trace IDs),
//!   matching the B3 wire encoding
//! - One context is owned per inbound request; it is cloned into the
//!   function handle and never shared across requests

/// Context of one trace hop.
///
/// `span_id` identifies the current (local) span; `parent_span_id` the
/// remote span this hop descends from, when one was propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub sampled: bool,
}

impl TraceContext {
    /// Start a brand-new trace with no parent.
    pub fn new_root() -> Self {
        Self {
            trace_id: random_hex_128(),
            span_id: random_hex_64(),
            parent_span_id: None,
            sampled: true,
        }
    }

    /// Continue a propagated trace: the remote span becomes the parent of a
    /// freshly generated local span.
    pub fn continue_from(trace_id: String, remote_span_id: String, sampled: bool) -> Self {
        Self {
            trace_id,
            span_id: random_hex_64(),
            parent_span_id: Some(remote_span_id),
            sampled,
        }
    }
}

/// Random 64-bit ID as 16 lowercase hex chars.
pub fn random_hex_64() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Random 128-bit ID as 32 lowercase hex chars.
pub fn random_hex_128() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// True when `value` is a plausible B3 ID: non-empty, expected length,
/// all hex digits.
pub fn is_valid_hex_id(value: &str, lengths: &[usize]) -> bool {
    lengths.contains(&value.len()) && value.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_root_shape() {
        let ctx = TraceContext::new_root();
        assert_eq!(ctx.trace_id.len(), 32);
        assert_eq!(ctx.span_id.len(), 16);
        assert!(ctx.parent_span_id.is_none());
        assert!(ctx.sampled);
        assert!(is_valid_hex_id(&ctx.trace_id, &[32]));
        assert!(is_valid_hex_id(&ctx.span_id, &[16]));
    }

    #[test]
    fn test_continue_from_links_parent() {
        let ctx = TraceContext::continue_from(
            "4bf92f3577b34da6a3ce929d0e0e4736".into(),
            "00f067aa0ba902b7".into(),
            false,
        );
        assert_eq!(ctx.trace_id, "4bf92f3577b34da6a3ce929d0e0e4736");
        assert_eq!(ctx.parent_span_id.as_deref(), Some("00f067aa0ba902b7"));
        assert_ne!(ctx.span_id, "00f067aa0ba902b7");
        assert!(!ctx.sampled);
    }

    #[test]
    fn test_roots_are_distinct() {
        let a = TraceContext::new_root();
        let b = TraceContext::new_root();
        assert_ne!(a.trace_id, b.trace_id);
        assert_ne!(a.span_id, b.span_id);
    }

    #[test]
    fn test_hex_id_validation() {
        assert!(is_valid_hex_id("00f067aa0ba902b7", &[16]));
        assert!(!is_valid_hex_id("00f067aa0ba902b", &[16]));
        assert!(!is_valid_hex_id("00f067aa0ba902bg", &[16]));
        assert!(!is_valid_hex_id("", &[16, 32]));
    }
}
