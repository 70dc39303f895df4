//! Error types for Ariadne.
//!
//! This module provides the [`BindingError`] type, which is the standard error
//! type raised while introspecting handler signatures and resolving route
//! bindings.
//!
//! The resolver recovers nothing locally: every variant below is propagated to
//! the dispatcher, which translates it into a user-visible response using
//! [`BindingError::status_code`] or [`BindingError::to_envelope`].
//!
//! | Variant | Category | Status |
//! |---|---|---|
//! | `ModelNotFound` | `NotFound` | 404 |
//! | `MalformedPolymorphicValue` | `Validation` | 400 |
//! | `TypeMismatch` | `Validation` | 400 |
//! | `Reflection` | `Internal` | 500 |
//! | `Construction` | `Internal` | 500 |
//! | `InvalidRoutePattern` | `Internal` | 500 |

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`BindingError`].
pub type BindingResult<T> = Result<T, BindingError>;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The raw value could not be interpreted (bad input from the caller).
    Validation,
    /// No object matched the raw value.
    NotFound,
    /// Misconfiguration on the server side (unknown handler, broken factory).
    Internal,
}

impl ErrorCategory {
    /// Returns the default HTTP status code for this error category.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standard error type for route binding.
///
/// # Example
///
/// ```
/// use ariadne_core::{BindingError, ErrorCategory};
/// use http::StatusCode;
///
/// let err = BindingError::model_not_found("User", ["7"]);
/// assert_eq!(err.category(), ErrorCategory::NotFound);
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// assert_eq!(err.to_string(), "No query results for model [User] 7");
/// ```
#[derive(Error, Debug)]
pub enum BindingError {
    /// A resolution strategy returned no object for the raw value.
    #[error("No query results for model [{type_name}] {}", .values.join(", "))]
    ModelNotFound {
        /// The concrete type that was queried.
        type_name: String,
        /// The raw value(s) that were attempted.
        values: Vec<String>,
    },

    /// The handler descriptor is malformed or references an undeclared type.
    #[error("Reflection failed for handler '{descriptor}': {reason}")]
    Reflection {
        /// The handler descriptor as written on the route.
        descriptor: String,
        /// Why the signature could not be reflected.
        reason: String,
    },

    /// A polymorphic parameter received a value without a type tag.
    #[error(
        "Malformed polymorphic value '{value}' for parameter '{parameter}': \
         expected '<tag>{delimiter}<identifier>'"
    )]
    MalformedPolymorphicValue {
        /// The route parameter name.
        parameter: String,
        /// The offending raw value.
        value: String,
        /// The delimiter that was expected between tag and identifier.
        delimiter: char,
    },

    /// The container failed to produce an instance of a type.
    #[error("Target [{type_name}] is not instantiable")]
    Construction {
        /// The type that could not be constructed.
        type_name: String,
        /// The underlying construction failure.
        #[source]
        source: anyhow::Error,
    },

    /// An already-resolved value does not match the declared parameter type.
    ///
    /// Only raised when strict type matching is enabled.
    #[error("Parameter '{parameter}' expects [{expected}] but holds [{actual}]")]
    TypeMismatch {
        /// The route parameter name.
        parameter: String,
        /// The declared parameter type.
        expected: String,
        /// The type of the value held by the route.
        actual: String,
    },

    /// A route URI pattern could not be parsed.
    #[error("Invalid route pattern '{uri}': {reason}")]
    InvalidRoutePattern {
        /// The URI pattern as written on the route.
        uri: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl BindingError {
    /// Creates a model-not-found error for a type and the attempted values.
    #[must_use]
    pub fn model_not_found<I, S>(type_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ModelNotFound {
            type_name: type_name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a reflection error for a handler descriptor.
    #[must_use]
    pub fn reflection(descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Reflection {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }

    /// Creates a malformed polymorphic value error.
    #[must_use]
    pub fn malformed_polymorphic(
        parameter: impl Into<String>,
        value: impl Into<String>,
        delimiter: char,
    ) -> Self {
        Self::MalformedPolymorphicValue {
            parameter: parameter.into(),
            value: value.into(),
            delimiter,
        }
    }

    /// Creates a construction error with the underlying cause.
    pub fn construction(type_name: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(
        parameter: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            parameter: parameter.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an invalid route pattern error.
    #[must_use]
    pub fn invalid_route_pattern(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRoutePattern {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::ModelNotFound { .. } => ErrorCategory::NotFound,
            Self::MalformedPolymorphicValue { .. } | Self::TypeMismatch { .. } => {
                ErrorCategory::Validation
            }
            Self::Reflection { .. }
            | Self::Construction { .. }
            | Self::InvalidRoutePattern { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns `true` if this is a [`BindingError::ModelNotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ModelNotFound { .. })
    }

    /// Converts this error to a serializable error envelope.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
                details: self.error_details(),
            },
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. } => "MODEL_NOT_FOUND",
            Self::Reflection { .. } => "REFLECTION_FAILED",
            Self::MalformedPolymorphicValue { .. } => "MALFORMED_POLYMORPHIC_VALUE",
            Self::Construction { .. } => "CONSTRUCTION_FAILED",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::InvalidRoutePattern { .. } => "INVALID_ROUTE_PATTERN",
        }
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            Self::ModelNotFound { type_name, values } => Some(serde_json::json!({
                "model": type_name,
                "ids": values,
            })),
            Self::MalformedPolymorphicValue { parameter, .. } => Some(serde_json::json!({
                "parameter": parameter,
            })),
            Self::TypeMismatch {
                parameter,
                expected,
                ..
            } => Some(serde_json::json!({
                "parameter": parameter,
                "expected": expected,
            })),
            // Server-side details stay out of client responses.
            Self::Reflection { .. }
            | Self::Construction { .. }
            | Self::InvalidRoutePattern { .. } => None,
        }
    }
}

/// Serializable error envelope for HTTP responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error details.
    pub error: ErrorDetail,
}

/// Error detail within an envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Error category.
    pub category: ErrorCategory,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
