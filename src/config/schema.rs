//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the runtime.
//! Values are populated from the process environment by `config::env`.

use url::Url;

/// Default listen port when `FUNC_PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Root configuration for the function runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Broker endpoint outbound events are published to.
    pub broker_url: Url,

    /// Trace collector endpoint. Span export is wired externally; the
    /// runtime records the address and logs it at startup.
    pub trace_collector_url: Url,

    /// Port the HTTP listener binds to.
    pub port: u16,

    /// Outbound publish settings.
    pub publish: PublishConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RuntimeConfig {
    /// Bind address for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Outbound publish configuration.
#[derive(Debug, Clone, Default)]
pub struct PublishConfig {
    /// Connection establishment timeout in milliseconds. `None` means no
    /// timeout: publish waits until the broker responds or the connection
    /// fails.
    pub connect_timeout_ms: Option<u64>,

    /// Total request timeout in milliseconds. `None` means no timeout.
    pub request_timeout_ms: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
