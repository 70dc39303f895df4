//! Configuration sections.

use ariadne_binding::{BindingOptions, DEFAULT_POLYMORPHIC_DELIMITER};
use ariadne_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

/// Route binding settings.
///
/// ```
/// use ariadne_config::BindingConfig;
///
/// let options = BindingConfig::default().options();
/// assert_eq!(options.polymorphic_delimiter, '@');
/// assert!(options.snake_case_fallback);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// Separator between type tag and identifier in polymorphic values.
    #[serde(default = "default_delimiter")]
    pub polymorphic_delimiter: char,

    /// Match camelCase parameter names against snake_case route parameters.
    #[serde(default = "default_true")]
    pub snake_case_fallback: bool,

    /// Fail when an already-resolved value has the wrong type.
    #[serde(default)]
    pub strict_type_match: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            polymorphic_delimiter: default_delimiter(),
            snake_case_fallback: true,
            strict_type_match: false,
        }
    }
}

impl BindingConfig {
    /// Converts to the resolver's runtime options.
    pub fn options(&self) -> BindingOptions {
        BindingOptions::default()
            .with_polymorphic_delimiter(self.polymorphic_delimiter)
            .with_snake_case_fallback(self.snake_case_fallback)
            .with_strict_type_match(self.strict_type_match)
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (trace, debug, info, warn, error, or per-target).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Emit span open/close events.
    #[serde(default)]
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the telemetry crate's logging configuration.
    ///
    /// Pretty output also turns on file and line info.
    pub fn to_log_config(&self) -> LogConfig {
        let pretty = self.format == LogFormat::Pretty;
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: !pretty,
            span_events: self.span_events,
            file_line_info: pretty,
            ..LogConfig::default()
        }
    }
}

fn default_delimiter() -> char {
    DEFAULT_POLYMORPHIC_DELIMITER
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
