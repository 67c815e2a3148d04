//! Outbound event publishing.
//!
//! # Responsibilities
//! - POST an envelope's payload to the configured broker endpoint
//! - Carry the canonical CloudEvents headers and injected trace context
//! - Classify the outcome: 2xx success, everything else a typed failure
//!
//! # Design Decisions
//! - One shared client, built once at startup; timeouts come from config
//!   and default to none
//! - No automatic retry: failures surface to the caller, who decides
//! - If the inbound request is aborted while a publish is in flight, the
//!   outbound call is cancelled best-effort only (known limitation)

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::PublishConfig;
use crate::event::envelope::{EventEnvelope, CONTENT_TYPE_JSON};
use crate::event::headers;
use crate::observability::metrics;
use crate::trace::{Propagator, SpanKind, TraceContext, Tracer};

/// Failure modes of a publish attempt. Both variants are returned to the
/// user function, never swallowed by the dispatcher.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Broker answered with a non-2xx status.
    #[error("broker returned non-success status {0}")]
    NonSuccessStatus(u16),

    /// The request never produced a status: connect failure, timeout,
    /// protocol error.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Publishes envelopes to the broker, propagating trace context.
pub struct EventPublisher {
    client: reqwest::Client,
    propagator: Arc<dyn Propagator>,
    tracer: Arc<dyn Tracer>,
}

impl EventPublisher {
    /// Build the publisher and its shared HTTP client.
    pub fn new(
        config: &PublishConfig,
        propagator: Arc<dyn Propagator>,
        tracer: Arc<dyn Tracer>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            client: builder.build()?,
            propagator,
            tracer,
        })
    }

    /// Publish `envelope` to `broker`.
    ///
    /// The request body is the JSON encoding of the envelope's `data` field
    /// alone; metadata rides in the `ce-*` headers. Completes only when the
    /// broker has responded or the transport failed.
    pub async fn publish(
        &self,
        envelope: &EventEnvelope,
        broker: &Url,
        trace: &TraceContext,
    ) -> Result<(), PublishError> {
        let mut outbound = HeaderMap::new();
        outbound.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_JSON),
        );
        headers::apply_outbound(&mut outbound, envelope);

        self.propagator.inject(trace, &mut outbound);
        for name in self.propagator.field_names() {
            if let Some(value) = outbound.get(*name).and_then(|v| v.to_str().ok()) {
                tracing::debug!(header = *name, value, "Injected propagation header");
            }
        }

        let _span = self
            .tracer
            .start_span("event-publish", SpanKind::Client, trace);

        let result = self
            .client
            .post(broker.clone())
            .headers(outbound)
            .body(envelope.wire_body())
            .send()
            .await;

        let outcome = match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(
                    event_id = %envelope.id,
                    status = response.status().as_u16(),
                    "Event published"
                );
                Ok(())
            }
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::warn!(
                    event_id = %envelope.id,
                    status,
                    "Broker rejected event"
                );
                Err(PublishError::NonSuccessStatus(status))
            }
            Err(e) => {
                tracing::warn!(event_id = %envelope.id, error = %e, "Publish transport failure");
                Err(PublishError::Transport(e.to_string()))
            }
        };

        metrics::record_publish(outcome.is_ok());
        outcome
    }
}
