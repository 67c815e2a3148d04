//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, /healthz route, catch-all)
//!     → dispatch.rs (trace extract → span → event headers → user function)
//!     → response returned unchanged
//! ```

pub mod dispatch;
pub mod server;

pub use server::{AppState, HttpServer};
