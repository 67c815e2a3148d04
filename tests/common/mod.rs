//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use url::Url;

use faas_runtime::config::{ObservabilityConfig, PublishConfig, RuntimeConfig};
use faas_runtime::function::UserFunction;
use faas_runtime::http::HttpServer;
use faas_runtime::lifecycle::Shutdown;
use faas_runtime::trace::{B3MultiPropagator, Propagator, Tracer};

/// One request observed by the mock broker.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[derive(Clone)]
struct BrokerState {
    status: u16,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Start a mock broker that records every request and answers with the
/// given status code. Returns its address and the capture log.
#[allow(dead_code)]
pub async fn start_broker(status: u16) -> (SocketAddr, Arc<Mutex<Vec<CapturedRequest>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = BrokerState {
        status,
        captured: captured.clone(),
    };
    let app = Router::new().fallback(capture).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, captured)
}

async fn capture(State(state): State<BrokerState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    state.captured.lock().unwrap().push(CapturedRequest {
        headers,
        body: body.to_vec(),
    });
    StatusCode::from_u16(state.status).unwrap()
}

/// Runtime config pointing at the given broker, everything else defaulted
/// for tests.
#[allow(dead_code)]
pub fn test_config(broker_url: &str) -> RuntimeConfig {
    RuntimeConfig {
        broker_url: Url::parse(broker_url).unwrap(),
        trace_collector_url: Url::parse("http://collector.local:9411").unwrap(),
        port: 0,
        publish: PublishConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

/// Start the runtime with the given function and tracer on an ephemeral
/// port. The returned `Shutdown` stops it.
#[allow(dead_code)]
pub async fn start_runtime(
    function: UserFunction,
    tracer: Arc<dyn Tracer>,
    broker_url: &str,
) -> (SocketAddr, Shutdown) {
    let propagator: Arc<dyn Propagator> = Arc::new(B3MultiPropagator::new());
    let server = HttpServer::new(test_config(broker_url), function, tracer, propagator).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    (addr, shutdown)
}

/// Span-lifecycle spy: counts starts and ends across all spans.
#[derive(Default)]
#[allow(dead_code)]
pub struct SpyTracer {
    pub starts: Mutex<Vec<String>>,
    pub ends: Arc<Mutex<Vec<String>>>,
}

impl Tracer for SpyTracer {
    fn start_span(
        &self,
        name: &str,
        _kind: faas_runtime::trace::SpanKind,
        _ctx: &faas_runtime::trace::TraceContext,
    ) -> faas_runtime::trace::SpanGuard {
        self.starts.lock().unwrap().push(name.to_string());
        let ends = self.ends.clone();
        let name = name.to_string();
        faas_runtime::trace::SpanGuard::new(move || {
            ends.lock().unwrap().push(name);
        })
    }
}
