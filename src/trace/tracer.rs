//! Span lifecycle management.
//!
//! # Responsibilities
//! - Start server- and client-kind spans for a trace context
//! - Guarantee span closure on every exit path via a scoped guard
//!
//! # Design Decisions
//! - `Tracer` is a trait so tests can substitute a lifecycle spy
//! - `SpanGuard` ends the span on drop; callers cannot forget to close it
//! - The production tracer emits structured start/end log events; span
//!   export to a collector is wired externally

use std::time::Instant;

use crate::trace::context::TraceContext;

/// Role of a span within a trace hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Handling an inbound request.
    Server,
    /// Making an outbound call.
    Client,
}

impl SpanKind {
    fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Server => "server",
            SpanKind::Client => "client",
        }
    }
}

/// Creates spans. Constructed once at startup and passed by reference into
/// the dispatcher and publisher.
pub trait Tracer: Send + Sync {
    /// Start a span for `ctx`. The returned guard ends the span when
    /// dropped, on every exit path.
    fn start_span(&self, name: &str, kind: SpanKind, ctx: &TraceContext) -> SpanGuard;
}

/// Scoped span handle. Dropping it ends the span exactly once.
pub struct SpanGuard {
    on_end: Option<Box<dyn FnOnce() + Send>>,
}

impl SpanGuard {
    /// Build a guard that runs `on_end` when dropped.
    pub fn new(on_end: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_end: Some(Box::new(on_end)),
        }
    }

    /// A guard that does nothing on drop.
    pub fn noop() -> Self {
        Self { on_end: None }
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        if let Some(end) = self.on_end.take() {
            end();
        }
    }
}

/// Production tracer: structured start/end events through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct LogTracer;

impl LogTracer {
    pub fn new() -> Self {
        Self
    }
}

impl Tracer for LogTracer {
    fn start_span(&self, name: &str, kind: SpanKind, ctx: &TraceContext) -> SpanGuard {
        let started = Instant::now();
        let name = name.to_string();
        let kind = kind.as_str();
        let trace_id = ctx.trace_id.clone();
        let span_id = ctx.span_id.clone();
        let parent = ctx.parent_span_id.clone().unwrap_or_default();
        let sampled = ctx.sampled;

        tracing::debug!(
            span = %name,
            kind,
            trace_id = %trace_id,
            span_id = %span_id,
            parent_span_id = %parent,
            sampled,
            "Span started"
        );

        SpanGuard::new(move || {
            tracing::debug!(
                span = %name,
                kind,
                trace_id = %trace_id,
                span_id = %span_id,
                elapsed_us = started.elapsed().as_micros() as u64,
                "Span ended"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_guard_ends_exactly_once() {
        let ends = Arc::new(AtomicU32::new(0));
        let counter = ends.clone();
        let guard = SpanGuard::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(ends.load(Ordering::SeqCst), 0);
        drop(guard);
        assert_eq!(ends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_ends_during_unwind() {
        let ends = Arc::new(AtomicU32::new(0));
        let counter = ends.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = SpanGuard::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            panic!("user function failure");
        });
        assert!(result.is_err());
        assert_eq!(ends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_log_tracer_returns_live_guard() {
        let tracer = LogTracer::new();
        let ctx = TraceContext::new_root();
        let guard = tracer.start_span("request", SpanKind::Server, &ctx);
        drop(guard);
    }
}
