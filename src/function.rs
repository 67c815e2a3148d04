//! User function interface.
//!
//! # Responsibilities
//! - Define the function value type registered at startup
//! - Hand the function a capability-scoped view of the current request:
//!   read-only CloudEvent metadata, response-event construction, publish
//!
//! # Design Decisions
//! - A single function value, no handler trait hierarchy
//! - `EventContext` exposes nothing beyond the three capabilities; no raw
//!   sockets, no tracer access
//! - Function errors propagate to the HTTP layer after span closure; the
//!   dispatcher never rewrites a successful response

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::Method;
use axum::response::Response;
use futures_util::future::BoxFuture;
use thiserror::Error;
use url::Url;

use crate::event::{EventEnvelope, EventPublisher, InboundEventHeaders, PublishError};
use crate::trace::TraceContext;

/// The inbound invocation payload handed to the user function.
#[derive(Debug, Clone)]
pub struct FunctionEvent {
    pub method: Method,
    pub path: String,
    /// Raw request body.
    pub data: Bytes,
    /// Inbound `Content-Type`, when present.
    pub content_type: Option<String>,
}

/// Failure raised by the user function. The runtime does not interpret it;
/// the HTTP layer renders it after the request span has closed.
#[derive(Debug, Error)]
#[error("function error: {0}")]
pub struct FunctionError(pub String);

impl FunctionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Outcome of one invocation: the HTTP response to return unchanged, or a
/// function error.
pub type FunctionResult = Result<Response, FunctionError>;

/// The user-supplied function, registered once at startup.
pub type UserFunction =
    Arc<dyn Fn(FunctionEvent, EventContext) -> BoxFuture<'static, FunctionResult> + Send + Sync>;

/// Per-request handle given to the user function.
///
/// Owns the request's inbound metadata and trace context; both die with the
/// request and are never visible to concurrent invocations.
#[derive(Clone)]
pub struct EventContext {
    inbound: InboundEventHeaders,
    trace: TraceContext,
    publisher: Arc<EventPublisher>,
    broker: Url,
}

impl EventContext {
    pub(crate) fn new(
        inbound: InboundEventHeaders,
        trace: TraceContext,
        publisher: Arc<EventPublisher>,
        broker: Url,
    ) -> Self {
        Self {
            inbound,
            trace,
            publisher,
            broker,
        }
    }

    /// Read-only view of the inbound CloudEvent metadata.
    pub fn headers(&self) -> &InboundEventHeaders {
        &self.inbound
    }

    /// Build a response envelope bound to this request's inbound context.
    pub fn build_response_event(
        &self,
        id: impl Into<String>,
        event_type: impl Into<String>,
        data: impl Into<String>,
    ) -> EventEnvelope {
        EventEnvelope::build_response(&self.inbound, id.into(), event_type.into(), data.into())
    }

    /// Publish an envelope to the configured broker, continuing this
    /// request's trace.
    pub async fn publish(&self, envelope: &EventEnvelope) -> Result<(), PublishError> {
        self.publisher
            .publish(envelope, &self.broker, &self.trace)
            .await
    }
}
