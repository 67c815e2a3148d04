//! Publisher outcome-classification tests against a mock broker.

use std::sync::Arc;

use faas_runtime::config::PublishConfig;
use faas_runtime::event::{EventEnvelope, EventPublisher, PublishError};
use faas_runtime::trace::{B3MultiPropagator, LogTracer, Propagator, TraceContext, Tracer};
use url::Url;

mod common;

fn publisher() -> EventPublisher {
    let propagator: Arc<dyn Propagator> = Arc::new(B3MultiPropagator::new());
    let tracer: Arc<dyn Tracer> = Arc::new(LogTracer::new());
    EventPublisher::new(&PublishConfig::default(), propagator, tracer).unwrap()
}

fn envelope(data: &str) -> EventEnvelope {
    EventEnvelope::new(
        "abc-1".into(),
        "order.created".into(),
        "shop".into(),
        "v1".into(),
        "1.0".into(),
        data.into(),
    )
}

#[tokio::test]
async fn test_publish_succeeds_on_201() {
    let (addr, captured) = common::start_broker(201).await;
    let broker = Url::parse(&format!("http://{addr}/publish")).unwrap();

    let result = publisher()
        .publish(&envelope(r#"{"x":1}"#), &broker, &TraceContext::new_root())
        .await;
    assert!(result.is_ok());
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_publish_classifies_500_as_non_success() {
    let (addr, _captured) = common::start_broker(500).await;
    let broker = Url::parse(&format!("http://{addr}/publish")).unwrap();

    let result = publisher()
        .publish(&envelope(r#"{"x":1}"#), &broker, &TraceContext::new_root())
        .await;
    match result {
        Err(PublishError::NonSuccessStatus(code)) => assert_eq!(code, 500),
        other => panic!("expected NonSuccessStatus(500), got {:?}", other),
    }
}

#[tokio::test]
async fn test_publish_classifies_connection_failure_as_transport() {
    // Nothing listens here.
    let broker = Url::parse("http://127.0.0.1:9/publish").unwrap();

    let result = publisher()
        .publish(&envelope(r#"{"x":1}"#), &broker, &TraceContext::new_root())
        .await;
    assert!(matches!(result, Err(PublishError::Transport(_))));
}

#[tokio::test]
async fn test_publish_sends_metadata_headers_and_raw_json_body() {
    let (addr, captured) = common::start_broker(202).await;
    let broker = Url::parse(&format!("http://{addr}/publish")).unwrap();

    publisher()
        .publish(&envelope(r#"{"x":1}"#), &broker, &TraceContext::new_root())
        .await
        .unwrap();

    let requests = captured.lock().unwrap();
    let publish = &requests[0];
    assert_eq!(publish.headers.get("content-type").unwrap(), "application/json");
    assert_eq!(publish.headers.get("ce-specversion").unwrap(), "1.0");
    assert_eq!(publish.headers.get("ce-type").unwrap(), "order.created");
    assert_eq!(publish.headers.get("ce-source").unwrap(), "shop");
    assert_eq!(publish.headers.get("ce-eventtypeversion").unwrap(), "v1");
    assert_eq!(publish.headers.get("ce-id").unwrap(), "abc-1");
    assert_eq!(publish.body, br#"{"x":1}"#.to_vec());
}

#[tokio::test]
async fn test_publish_encodes_text_payload_as_json_string() {
    let (addr, captured) = common::start_broker(202).await;
    let broker = Url::parse(&format!("http://{addr}/publish")).unwrap();

    publisher()
        .publish(&envelope("hello"), &broker, &TraceContext::new_root())
        .await
        .unwrap();

    let requests = captured.lock().unwrap();
    // Body stays valid JSON even for a plain-text payload.
    assert_eq!(requests[0].body, br#""hello""#.to_vec());
}

#[tokio::test]
async fn test_publish_injects_trace_headers() {
    let (addr, captured) = common::start_broker(202).await;
    let broker = Url::parse(&format!("http://{addr}/publish")).unwrap();

    let ctx = TraceContext {
        trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".into(),
        span_id: "b7ad6b7169203331".into(),
        parent_span_id: Some("00f067aa0ba902b7".into()),
        sampled: true,
    };
    publisher()
        .publish(&envelope(r#"{"x":1}"#), &broker, &ctx)
        .await
        .unwrap();

    let requests = captured.lock().unwrap();
    let publish = &requests[0];
    assert_eq!(
        publish.headers.get("x-b3-traceid").unwrap(),
        "4bf92f3577b34da6a3ce929d0e0e4736"
    );
    assert_eq!(publish.headers.get("x-b3-spanid").unwrap(), "b7ad6b7169203331");
    assert_eq!(
        publish.headers.get("x-b3-parentspanid").unwrap(),
        "00f067aa0ba902b7"
    );
    assert_eq!(publish.headers.get("x-b3-sampled").unwrap(), "1");
}
