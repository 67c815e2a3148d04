//! CloudEvents FaaS Runtime Shim
//!
//! Hosts a user-supplied function behind HTTP and transparently handles
//! CloudEvents envelope construction, outbound event publishing and
//! distributed-trace propagation.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                FUNCTION RUNTIME               │
//!                    │                                               │
//!   Event Request    │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ dispatch │──▶│    user    │  │
//!   (ce-* headers,   │  │ server │   │ (span +  │   │  function  │  │
//!    x-b3-* headers) │  └────────┘   │ extract) │   └─────┬──────┘  │
//!                    │               └──────────┘         │          │
//!                    │                                    ▼          │
//!   Response         │               ┌──────────┐   ┌────────────┐  │
//!   ◀────────────────┼───────────────│ response │   │ publisher  │──┼──▶ Broker
//!                    │               │unchanged │   │ (ce-* +    │  │   (POST)
//!                    │               └──────────┘   │  b3 inject)│  │
//!                    │                              └────────────┘  │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │ config (env) · trace (b3) · logging ·   │ │
//!                    │  │ metrics · lifecycle                     │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use tokio::net::TcpListener;
use uuid::Uuid;

use faas_runtime::config;
use faas_runtime::function::{EventContext, FunctionEvent, FunctionResult, UserFunction};
use faas_runtime::http::HttpServer;
use faas_runtime::lifecycle::Shutdown;
use faas_runtime::observability::{logging, metrics};
use faas_runtime::trace::{B3MultiPropagator, LogTracer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Required environment is fatal before anything else starts.
    let config = config::load_from_env()?;

    logging::init(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        broker = %config.broker_url,
        trace_collector = %config.trace_collector_url,
        port = config.port,
        "faas-runtime starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The registered user function. This binary ships an echo sample that
    // demonstrates the full handle surface; platform builds link their own.
    let function: UserFunction = Arc::new(|event, ctx| Box::pin(echo(event, ctx)));

    let listener = TcpListener::bind(config.bind_address()).await?;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(
        config,
        function,
        Arc::new(LogTracer::new()),
        Arc::new(B3MultiPropagator::new()),
    )?;

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Sample function: echoes the payload; for requests carrying a CloudEvent
/// ID it also publishes an echo event back to the broker.
async fn echo(event: FunctionEvent, ctx: EventContext) -> FunctionResult {
    let data = String::from_utf8_lossy(&event.data).into_owned();

    if !ctx.headers().id.is_empty() {
        let event_type = if ctx.headers().event_type.is_empty() {
            "echo".to_string()
        } else {
            format!("{}.echo", ctx.headers().event_type)
        };
        let envelope =
            ctx.build_response_event(Uuid::new_v4().to_string(), event_type, data.clone());
        if let Err(e) = ctx.publish(&envelope).await {
            // The sample surfaces publish failures in the response body;
            // real functions choose their own policy.
            return Ok((StatusCode::BAD_GATEWAY, format!("publish failed: {e}")).into_response());
        }
    }

    Ok((StatusCode::OK, data).into_response())
}
