//! Typed configuration for Ariadne.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Example
//!
//! ```no_run
//! use ariadne_config::ConfigLoader;
//!
//! # fn main() -> Result<(), ariadne_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("ariadne.toml")?
//!     .with_env_prefix("ARIADNE")
//!     .load()?;
//!
//! let options = config.binding.options();
//! let logging = config.logging.to_log_config();
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [binding]
//! polymorphic_delimiter = "@"
//! snake_case_fallback = true
//! strict_type_match = false
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! span_events = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `ARIADNE__BINDING__POLYMORPHIC_DELIMITER=:`
//! - `ARIADNE__BINDING__STRICT_TYPE_MATCH=true`
//! - `ARIADNE__LOGGING__LEVEL=ariadne_binding=debug`

#![doc(html_root_url = "https://docs.rs/ariadne-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::AriadneConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{BindingConfig, LogFormat, LoggingConfig};
