//! Canonical CloudEvents header names and extraction.
//!
//! # Responsibilities
//! - Define the fixed ce-* header name set
//! - Extract inbound metadata (case-insensitive, first value wins)
//! - Apply outbound metadata to a publish request
//!
//! # Design Decisions
//! - Extraction never fails: absent headers become empty strings
//! - `HeaderMap` lookups are case-insensitive by construction, so no
//!   normalization pass is needed

use axum::http::{HeaderMap, HeaderValue};

use crate::event::envelope::EventEnvelope;

pub const CE_TYPE_HEADER: &str = "ce-type";
pub const CE_SOURCE_HEADER: &str = "ce-source";
pub const CE_EVENT_TYPE_VERSION_HEADER: &str = "ce-eventtypeversion";
pub const CE_SPEC_VERSION_HEADER: &str = "ce-specversion";
pub const CE_ID_HEADER: &str = "ce-id";
pub const CE_TIME_HEADER: &str = "ce-time";

/// CloudEvent metadata extracted from an inbound request.
///
/// Every field is present even when the request lacked the matching header;
/// absent values are empty strings. Built once per request, immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEventHeaders {
    pub event_type: String,
    pub source: String,
    pub event_type_version: String,
    pub spec_version: String,
    pub id: String,
    pub time: String,
}

impl InboundEventHeaders {
    /// Extract CloudEvent metadata from inbound HTTP headers.
    ///
    /// Pure and infallible: malformed or missing headers degrade to empty
    /// strings rather than erroring.
    pub fn extract(headers: &HeaderMap) -> Self {
        Self {
            event_type: first_value(headers, CE_TYPE_HEADER),
            source: first_value(headers, CE_SOURCE_HEADER),
            event_type_version: first_value(headers, CE_EVENT_TYPE_VERSION_HEADER),
            spec_version: first_value(headers, CE_SPEC_VERSION_HEADER),
            id: first_value(headers, CE_ID_HEADER),
            time: first_value(headers, CE_TIME_HEADER),
        }
    }
}

/// First value for `name`, or the empty string when absent or not valid
/// UTF-8.
fn first_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Set the outbound CloudEvents headers for a publish request from the
/// envelope's fields. Existing values for those names are overwritten.
pub fn apply_outbound(headers: &mut HeaderMap, envelope: &EventEnvelope) {
    set_string(headers, CE_SPEC_VERSION_HEADER, &envelope.spec_version);
    set_string(headers, CE_TYPE_HEADER, &envelope.event_type);
    set_string(headers, CE_SOURCE_HEADER, &envelope.source);
    set_string(
        headers,
        CE_EVENT_TYPE_VERSION_HEADER,
        &envelope.event_type_version,
    );
    set_string(headers, CE_ID_HEADER, &envelope.id);
}

fn set_string(headers: &mut HeaderMap, name: &'static str, value: &str) {
    // Header values must be visible ASCII; anything else is dropped rather
    // than poisoning the whole request.
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}
