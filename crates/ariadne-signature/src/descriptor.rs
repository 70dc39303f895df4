//! Handler descriptors.
//!
//! A route names its handler either as a `"Type#method"` string or as a
//! callable whose signature was captured when it was registered (usually by
//! `#[route_signature]`).

use std::fmt;
use std::str::FromStr;

use ariadne_core::{BindingError, BindingResult};

use crate::Signature;

/// Separator between the type and the method in a handler string.
pub const METHOD_DELIMITER: char = '#';

/// Method name used when a handler string names only a type.
pub const INVOKE_METHOD: &str = "__invoke";

/// Reference to a route handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerDescriptor {
    /// A method on a registered handler type (`"UserController#show"`).
    Method {
        /// The handler type identifier.
        type_name: String,
        /// The method name.
        method: String,
    },
    /// A function or closure with its declared signature.
    Callable(Signature),
}

impl HandlerDescriptor {
    /// Parses a `"Type#method"` handler string.
    ///
    /// A bare `"Type"` refers to the type's invokable method.
    ///
    /// # Example
    ///
    /// ```
    /// use ariadne_signature::HandlerDescriptor;
    ///
    /// let handler = HandlerDescriptor::parse("UserController#show").unwrap();
    /// assert_eq!(handler.to_string(), "UserController#show");
    ///
    /// let invokable = HandlerDescriptor::parse("ShowDashboard").unwrap();
    /// assert_eq!(invokable.to_string(), "ShowDashboard#__invoke");
    ///
    /// assert!(HandlerDescriptor::parse("#show").is_err());
    /// ```
    pub fn parse(uses: &str) -> BindingResult<Self> {
        let (type_name, method) = uses
            .split_once(METHOD_DELIMITER)
            .unwrap_or((uses, INVOKE_METHOD));

        if type_name.trim().is_empty() {
            return Err(BindingError::reflection(uses, "missing handler type"));
        }
        if method.trim().is_empty() {
            return Err(BindingError::reflection(uses, "missing handler method"));
        }
        if method.contains(METHOD_DELIMITER) {
            return Err(BindingError::reflection(uses, "more than one method delimiter"));
        }

        Ok(Self::method(type_name, method))
    }

    /// Creates a method descriptor.
    #[must_use]
    pub fn method(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Method {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    /// Creates a callable descriptor.
    #[must_use]
    pub fn callable(signature: Signature) -> Self {
        Self::Callable(signature)
    }
}

impl FromStr for HandlerDescriptor {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method { type_name, method } => {
                write!(f, "{type_name}{METHOD_DELIMITER}{method}")
            }
            Self::Callable(_) => f.write_str("Closure"),
        }
    }
}

impl From<Signature> for HandlerDescriptor {
    fn from(signature: Signature) -> Self {
        Self::Callable(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        let handler: HandlerDescriptor = "PostController#update".parse().unwrap();
        assert_eq!(
            handler,
            HandlerDescriptor::method("PostController", "update")
        );
    }

    #[test]
    fn test_parse_invokable() {
        let handler = HandlerDescriptor::parse("ShowDashboard").unwrap();
        assert_eq!(handler, HandlerDescriptor::method("ShowDashboard", INVOKE_METHOD));
    }

    #[test]
    fn test_parse_malformed() {
        for uses in ["", "#show", "UserController#", "A#b#c", "  #x"] {
            let err = HandlerDescriptor::parse(uses).unwrap_err();
            assert!(
                matches!(err, BindingError::Reflection { .. }),
                "expected reflection error for {uses:?}"
            );
        }
    }

    #[test]
    fn test_callable_display() {
        let handler = HandlerDescriptor::from(Signature::new().param("user", "User"));
        assert_eq!(handler.to_string(), "Closure");
    }
}
