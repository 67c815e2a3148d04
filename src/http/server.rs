//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: liveness probe plus catch-all dispatch
//! - Wire up middleware (request tracing)
//! - Bind to a listener and serve until shutdown
//!
//! # Design Decisions
//! - `/healthz` answers before any CloudEvent processing
//! - Every other method/path reaches the user function; routing beyond the
//!   probe is not this runtime's concern

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::RuntimeConfig;
use crate::event::EventPublisher;
use crate::function::UserFunction;
use crate::http::dispatch::dispatch;
use crate::trace::{Propagator, Tracer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub function: UserFunction,
    pub publisher: Arc<EventPublisher>,
    pub propagator: Arc<dyn Propagator>,
    pub tracer: Arc<dyn Tracer>,
    pub broker: Url,
}

/// HTTP server hosting the user function.
pub struct HttpServer {
    router: Router,
    config: RuntimeConfig,
}

impl HttpServer {
    /// Create a new server around the registered user function and an
    /// explicitly constructed tracer/propagator pair.
    pub fn new(
        config: RuntimeConfig,
        function: UserFunction,
        tracer: Arc<dyn Tracer>,
        propagator: Arc<dyn Propagator>,
    ) -> Result<Self, reqwest::Error> {
        let publisher = Arc::new(EventPublisher::new(
            &config.publish,
            propagator.clone(),
            tracer.clone(),
        )?);

        let state = AppState {
            function,
            publisher,
            propagator,
            tracer,
            broker: config.broker_url.clone(),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(healthz))
            .fallback(dispatch)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            broker = %self.config.broker_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

/// Liveness probe. No CloudEvent processing, no span.
async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Wait for Ctrl+C or a coordinated shutdown.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
            tracing::info!("Shutdown signal received");
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown requested");
        }
    }
}
