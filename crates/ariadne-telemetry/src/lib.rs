//! Logging for Ariadne.
//!
//! The resolver and introspector emit `tracing` events with the field names
//! in [`fields`]. This crate installs a `tracing-subscriber` pipeline for
//! them:
//!
//! - **JSON** output for production
//! - **Pretty** output with span events for development
//! - `EnvFilter` directives for per-crate levels

#![doc(html_root_url = "https://docs.rs/ariadne-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

#[doc(hidden)]
pub use tracing;

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
