//! CloudEvents FaaS Runtime Shim Library

pub mod config;
pub mod event;
pub mod function;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod trace;

pub use config::{ConfigError, RuntimeConfig};
pub use event::{EventEnvelope, EventPublisher, InboundEventHeaders, PublishError};
pub use function::{EventContext, FunctionEvent, FunctionError, FunctionResult, UserFunction};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use trace::{B3MultiPropagator, LogTracer, TraceContext};
