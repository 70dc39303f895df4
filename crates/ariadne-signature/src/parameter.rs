//! Handler parameters and signatures.

use std::collections::HashSet;

/// A formal parameter of a route handler, as known from its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerParameter {
    name: String,
    declared_type: Option<String>,
    optional: bool,
}

impl HandlerParameter {
    /// Creates a parameter with an optional declared type.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: Option<&str>, optional: bool) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.map(ToString::to_string),
            optional,
        }
    }

    /// Creates a required parameter with a declared type.
    #[must_use]
    pub fn typed(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type.into()),
            optional: false,
        }
    }

    /// Creates a required parameter with no declared type.
    #[must_use]
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            optional: false,
        }
    }

    /// Marks the parameter as optional.
    #[must_use]
    pub fn into_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type identifier, if any.
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Returns `true` if the parameter may be omitted.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// The ordered formal parameter list of a handler.
///
/// # Example
///
/// ```
/// use ariadne_signature::Signature;
///
/// let signature = Signature::new()
///     .param("user", "User")
///     .optional_param("post", "Post")
///     .untyped("page");
///
/// assert_eq!(signature.len(), 3);
/// assert_eq!(signature.get("post").map(|p| p.is_optional()), Some(true));
/// assert_eq!(signature.get("page").and_then(|p| p.declared_type()), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    parameters: Vec<HandlerParameter>,
}

impl Signature {
    /// Creates an empty signature.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, parameter: HandlerParameter) {
        self.parameters.push(parameter);
    }

    /// Appends a required typed parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        self.push(HandlerParameter::typed(name, declared_type));
        self
    }

    /// Appends an optional typed parameter.
    #[must_use]
    pub fn optional_param(
        mut self,
        name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Self {
        self.push(HandlerParameter::typed(name, declared_type).into_optional());
        self
    }

    /// Appends a parameter without a declared type.
    #[must_use]
    pub fn untyped(mut self, name: impl Into<String>) -> Self {
        self.push(HandlerParameter::untyped(name));
        self
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HandlerParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Returns the parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[HandlerParameter] {
        &self.parameters
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> std::slice::Iter<'_, HandlerParameter> {
        self.parameters.iter()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Checks that the declaration is well formed: every parameter is named,
    /// names are unique and declared types are non-empty.
    pub(crate) fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if parameter.name.is_empty() {
                return Err("parameter without a name".to_string());
            }
            if !seen.insert(parameter.name.as_str()) {
                return Err(format!("duplicate parameter '{}'", parameter.name));
            }
            if parameter.declared_type.as_deref() == Some("") {
                return Err(format!("parameter '{}' has an empty type", parameter.name));
            }
        }
        Ok(())
    }
}

impl FromIterator<HandlerParameter> for Signature {
    fn from_iter<I: IntoIterator<Item = HandlerParameter>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Signature {
    type Item = HandlerParameter;
    type IntoIter = std::vec::IntoIter<HandlerParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.into_iter()
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = &'a HandlerParameter;
    type IntoIter = std::slice::Iter<'a, HandlerParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_constructors() {
        let typed = HandlerParameter::typed("user", "User");
        assert_eq!(typed.name(), "user");
        assert_eq!(typed.declared_type(), Some("User"));
        assert!(!typed.is_optional());

        let untyped = HandlerParameter::untyped("page");
        assert_eq!(untyped.declared_type(), None);

        let optional = HandlerParameter::new("post", Some("Post"), true);
        assert!(optional.is_optional());
    }

    #[test]
    fn test_signature_preserves_order() {
        let signature = Signature::new()
            .param("b", "B")
            .param("a", "A")
            .untyped("c");

        let names: Vec<_> = signature.iter().map(HandlerParameter::name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_validate_duplicate_names() {
        let signature = Signature::new().param("user", "User").untyped("user");
        let err = signature.validate().unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_validate_empty_type() {
        let signature = Signature::new().param("user", "");
        assert!(signature.validate().is_err());
    }

    #[test]
    fn test_validate_empty_name() {
        let signature: Signature = std::iter::once(HandlerParameter::untyped("")).collect();
        assert!(signature.validate().is_err());
    }

    #[test]
    fn test_validate_ok() {
        let signature = Signature::new().param("user", "User").optional_param("post", "Post");
        assert!(signature.validate().is_ok());
    }
}
