//! Structured logging initialization.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber once at startup
//! - Respect RUST_LOG when set, fall back to the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber. `level` is the configured default,
/// overridden by RUST_LOG when present.
pub fn init(level: &str) {
    let fallback = format!("faas_runtime={level},tower_http=warn");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&fallback)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
