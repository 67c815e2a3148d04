//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → env.rs (read & parse variables)
//!     → RuntimeConfig (validated, immutable)
//!     → shared via Arc to server, dispatcher, publisher
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the process must restart to change it
//! - Required values (broker URL, trace collector URL) fail startup if
//!   absent or malformed
//! - Optional values carry defaults so a minimal environment works

pub mod env;
pub mod schema;

pub use env::{load_from_env, ConfigError};
pub use schema::{ObservabilityConfig, PublishConfig, RuntimeConfig};
