//! Per-request dispatch to the user function.
//!
//! # Responsibilities
//! - Extract trace context and CloudEvent metadata from the request
//! - Start a server-kind span and close it on every exit path
//! - Invoke the user function with its capability handle
//! - Return the function's response unchanged
//!
//! # Design Decisions
//! - The span guard is dropped before the result is inspected, so closure
//!   precedes error propagation
//! - Function errors are not caught or transformed here; they reach the
//!   HTTP layer, which renders a 500
//! - Trace context is owned by this request; nothing leaks across requests

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::event::InboundEventHeaders;
use crate::function::{EventContext, FunctionEvent};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::trace::SpanKind;

/// Catch-all handler: one invocation of the user function per request.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_string();

    let trace = state.propagator.extract(&parts.headers);
    let span = state
        .tracer
        .start_span("function-invocation", SpanKind::Server, &trace);

    let inbound = InboundEventHeaders::extract(&parts.headers);
    tracing::debug!(
        method = %method,
        path = %path,
        trace_id = %trace.trace_id,
        span_id = %trace.span_id,
        event_id = %inbound.id,
        event_type = %inbound.event_type,
        "Dispatching request"
    );

    let data = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request body");
            // Span guard drops here too.
            return (StatusCode::BAD_REQUEST, "failed to read request body").into_response();
        }
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let event = FunctionEvent {
        method: method.clone(),
        path,
        data,
        content_type,
    };
    let context = EventContext::new(
        inbound,
        trace.clone(),
        state.publisher.clone(),
        state.broker.clone(),
    );

    let result = (state.function)(event, context).await;

    // Unconditional span closure, before the function's outcome is acted on.
    drop(span);

    match result {
        Ok(response) => {
            metrics::record_invocation(method.as_str(), response.status().as_u16(), start);
            response
        }
        Err(e) => {
            tracing::error!(error = %e, "User function failed");
            metrics::record_invocation(method.as_str(), 500, start);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
