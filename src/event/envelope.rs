//! Outbound event envelope construction.
//!
//! # Responsibilities
//! - Represent an outbound CloudEvent (metadata + payload)
//! - Derive the payload content type by sniffing the data for valid JSON
//! - Copy inbound context fields verbatim into response envelopes
//!
//! # Design Decisions
//! - `data_content_type` is a pure function of the payload's syntactic
//!   validity, computed once in the constructor
//! - No network or I/O here; the envelope is consumed by the publisher

use serde::{Deserialize, Serialize};

use crate::event::headers::InboundEventHeaders;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// An outbound CloudEvent envelope.
///
/// Constructed either directly or from inbound context via
/// [`EventEnvelope::build_response`], consumed exactly once by the
/// publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// Caller-supplied event ID. Uniqueness is the caller's concern.
    pub id: String,

    /// Event type, e.g. `order.created`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Originating source, copied from the inbound event.
    pub source: String,

    /// Event type version, copied from the inbound event.
    pub event_type_version: String,

    /// CloudEvents spec version, copied from the inbound event.
    pub spec_version: String,

    /// Payload. Sent to the broker as the request body.
    pub data: String,

    /// `application/json` when `data` parses as JSON, `text/plain`
    /// otherwise. Fixed at construction.
    pub data_content_type: String,
}

impl EventEnvelope {
    /// Build an envelope from explicit fields, deriving the content type.
    pub fn new(
        id: String,
        event_type: String,
        source: String,
        event_type_version: String,
        spec_version: String,
        data: String,
    ) -> Self {
        let data_content_type = sniff_content_type(&data).to_string();
        Self {
            id,
            event_type,
            source,
            event_type_version,
            spec_version,
            data,
            data_content_type,
        }
    }

    /// Build a response envelope for the given inbound event context.
    ///
    /// `source`, `event_type_version` and `spec_version` are copied verbatim
    /// from the inbound headers; `id`, `event_type` and `data` come from the
    /// caller.
    pub fn build_response(
        inbound: &InboundEventHeaders,
        id: String,
        event_type: String,
        data: String,
    ) -> Self {
        Self::new(
            id,
            event_type,
            inbound.source.clone(),
            inbound.event_type_version.clone(),
            inbound.spec_version.clone(),
            data,
        )
    }

    /// Wire body for the broker request: the JSON encoding of `data` alone.
    ///
    /// A payload that already is valid JSON goes out as-is; anything else is
    /// encoded as a JSON string literal so the body stays valid JSON.
    pub fn wire_body(&self) -> Vec<u8> {
        if self.data_content_type == CONTENT_TYPE_JSON {
            self.data.clone().into_bytes()
        } else {
            // Serializing a &str cannot fail.
            serde_json::to_vec(&self.data).unwrap_or_default()
        }
    }
}

/// Strict JSON sniff: any successful `serde_json` parse counts as JSON.
fn sniff_content_type(data: &str) -> &'static str {
    if serde_json::from_str::<serde_json::Value>(data).is_ok() {
        CONTENT_TYPE_JSON
    } else {
        CONTENT_TYPE_TEXT
    }
}
