//! Main configuration type.

use serde::{Deserialize, Serialize};

use crate::{BindingConfig, ConfigError, LogFormat, LoggingConfig};

/// Complete Ariadne configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// ```
/// use ariadne_config::AriadneConfig;
///
/// let config = AriadneConfig::default();
/// assert_eq!(config.binding.polymorphic_delimiter, '@');
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct AriadneConfig {
    /// Route binding settings.
    #[serde(default)]
    pub binding: BindingConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AriadneConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The polymorphic delimiter is alphanumeric or whitespace
    /// - The logging level is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let delimiter = self.binding.polymorphic_delimiter;
        if delimiter.is_alphanumeric() || delimiter.is_whitespace() {
            return Err(ConfigError::invalid_value(
                "binding.polymorphic_delimiter",
                format!("{delimiter:?} cannot separate a type tag from an identifier"),
            ));
        }

        self.logging
            .to_log_config()
            .validate()
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;

        Ok(())
    }

    /// Development preset: debug level, pretty output with span events.
    ///
    /// ```
    /// use ariadne_config::{AriadneConfig, LogFormat};
    ///
    /// let config = AriadneConfig::development();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        Self {
            binding: BindingConfig::default(),
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                span_events: true,
                ..LoggingConfig::default()
            },
        }
    }

    /// Production preset: info level JSON logs.
    ///
    /// Binding options stay at their defaults. Strict type matching is only
    /// enabled explicitly, since it rejects values earlier phases resolved.
    #[must_use]
    pub fn production() -> Self {
        Self {
            binding: BindingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AriadneConfig::default().validate().is_ok());
        assert!(AriadneConfig::development().validate().is_ok());
        assert!(AriadneConfig::production().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = AriadneConfig::development();
        assert_eq!(dev.logging.level, "debug");
        assert!(dev.logging.span_events);
        assert!(!dev.binding.strict_type_match);

        let prod = AriadneConfig::production();
        assert_eq!(prod.logging.format, LogFormat::Json);
        assert_eq!(prod.binding, BindingConfig::default());
        assert!(!prod.binding.strict_type_match);
    }

    #[test]
    fn test_validate_rejects_alphanumeric_delimiter() {
        let mut config = AriadneConfig::default();
        config.binding.polymorphic_delimiter = 'x';
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("binding.polymorphic_delimiter"));
    }

    #[test]
    fn test_validate_rejects_whitespace_delimiter() {
        let mut config = AriadneConfig::default();
        config.binding.polymorphic_delimiter = ' ';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_level() {
        let mut config = AriadneConfig::default();
        config.logging.level = "ariadne_binding=loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AriadneConfig::development();
        let text = toml::to_string(&config).unwrap();
        let parsed: AriadneConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<AriadneConfig, _> = toml::from_str(
            r#"
            [binding]
            delimiter = ":"
            "#,
        );
        assert!(result.is_err());
    }
}
