//! Configuration loading from the process environment.
//!
//! # Responsibilities
//! - Read and parse environment variables into `RuntimeConfig`
//! - Distinguish required values (fatal when absent) from optional ones
//! - Report the offending variable name in every error

use std::env;

use thiserror::Error;
use url::Url;

use crate::config::schema::{
    ObservabilityConfig, PublishConfig, RuntimeConfig, DEFAULT_PORT,
};

/// Broker endpoint for outbound events. Required.
pub const ENV_BROKER_URL: &str = "EVENT_BROKER_URL";
/// Trace collector endpoint. Required.
pub const ENV_TRACE_COLLECTOR_URL: &str = "TRACE_COLLECTOR_URL";
/// Listen port. Optional, defaults to 8080.
pub const ENV_FUNC_PORT: &str = "FUNC_PORT";
/// Publish connect timeout in milliseconds. Optional, no timeout by default.
pub const ENV_PUBLISH_CONNECT_TIMEOUT_MS: &str = "PUBLISH_CONNECT_TIMEOUT_MS";
/// Publish request timeout in milliseconds. Optional, no timeout by default.
pub const ENV_PUBLISH_REQUEST_TIMEOUT_MS: &str = "PUBLISH_REQUEST_TIMEOUT_MS";
/// Log level filter. Optional, defaults to "info".
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
/// Enable the Prometheus metrics endpoint ("true"/"false"). Optional.
pub const ENV_METRICS_ENABLED: &str = "METRICS_ENABLED";
/// Metrics endpoint bind address. Optional.
pub const ENV_METRICS_ADDRESS: &str = "METRICS_ADDRESS";

/// Errors raised while loading configuration. All of them are fatal at
/// startup: the process does not start with a broken environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A URL-valued variable did not parse.
    #[error("environment variable {var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    /// A numeric variable did not parse.
    #[error("environment variable {var} is not a valid number: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Load and validate the runtime configuration from the environment.
pub fn load_from_env() -> Result<RuntimeConfig, ConfigError> {
    let broker_url = required_url(ENV_BROKER_URL)?;
    let trace_collector_url = required_url(ENV_TRACE_COLLECTOR_URL)?;

    let port = match optional(ENV_FUNC_PORT) {
        Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
            var: ENV_FUNC_PORT,
            value: raw,
        })?,
        None => DEFAULT_PORT,
    };

    let publish = PublishConfig {
        connect_timeout_ms: optional_millis(ENV_PUBLISH_CONNECT_TIMEOUT_MS)?,
        request_timeout_ms: optional_millis(ENV_PUBLISH_REQUEST_TIMEOUT_MS)?,
    };

    let defaults = ObservabilityConfig::default();
    let observability = ObservabilityConfig {
        log_level: optional(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
        metrics_enabled: optional(ENV_METRICS_ENABLED)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.metrics_enabled),
        metrics_address: optional(ENV_METRICS_ADDRESS).unwrap_or(defaults.metrics_address),
    };

    Ok(RuntimeConfig {
        broker_url,
        trace_collector_url,
        port,
        publish,
        observability,
    })
}

fn optional(var: &'static str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

fn required_url(var: &'static str) -> Result<Url, ConfigError> {
    let raw = optional(var).ok_or(ConfigError::Missing(var))?;
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { var, source })
}

fn optional_millis(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match optional(var) {
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        None => Ok(None),
    }
}
