//! Route parameter storage.
//!
//! This module provides the parameter bag a route carries through the binding
//! phase. Values start as raw strings captured from the URL and are replaced
//! in place by resolved objects, keeping their position in the URL pattern.

use ariadne_core::ParameterValue;
use smallvec::SmallVec;

/// Maximum number of parameters stored inline (stack allocated).
const INLINE_PARAMS: usize = 4;

/// Named route parameters in URL order.
///
/// # Example
///
/// ```rust
/// use ariadne_binding::RouteParameters;
///
/// let mut params = RouteParameters::new();
/// params.set("user", "7");
/// params.set("post_id", "9");
///
/// assert_eq!(params.get("user").and_then(|v| v.as_raw()), Some("7"));
/// assert_eq!(params.position("post_id"), Some(1));
/// assert!(params.get("post").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteParameters {
    inner: SmallVec<[(String, ParameterValue); INLINE_PARAMS]>,
}

impl RouteParameters {
    /// Creates a new empty parameter bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter bag with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SmallVec::with_capacity(capacity),
        }
    }

    /// Sets a parameter. An existing entry keeps its position; a new one is
    /// appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        let name = name.into();
        let value = value.into();
        match self.inner.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.inner.push((name, value)),
        }
    }

    /// Returns the value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.inner.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns `true` if a parameter with exactly this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.iter().any(|(n, _)| n == name)
    }

    /// Returns the position of a parameter in URL order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.inner.iter().position(|(n, _)| n == name)
    }

    /// Returns the value of the parameter immediately before `name`.
    #[must_use]
    pub fn preceding(&self, name: &str) -> Option<&ParameterValue> {
        let position = self.position(name)?;
        let previous = position.checked_sub(1)?;
        self.inner.get(previous).map(|(_, v)| v)
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        let position = self.position(name)?;
        Some(self.inner.remove(position).1)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns the parameter names in URL order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(|(n, _)| n.as_str())
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Clears all parameters, retaining allocated capacity.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<'a> IntoIterator for &'a RouteParameters {
    type Item = (&'a str, &'a ParameterValue);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, ParameterValue)>,
        fn(&'a (String, ParameterValue)) -> (&'a str, &'a ParameterValue),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParameters
where
    K: Into<String>,
    V: Into<ParameterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.set(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_new() {
        let params = RouteParameters::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params: RouteParameters = [("user", "7"), ("post", "9")].into_iter().collect();
        params.set("user", "8");

        let names: Vec<_> = params.names().collect();
        assert_eq!(names, vec!["user", "post"]);
        assert_eq!(params.get("user").and_then(ParameterValue::as_raw), Some("8"));
    }

    #[test]
    fn test_exact_name_only() {
        let params: RouteParameters = [("post_id", "9")].into_iter().collect();
        assert!(params.contains("post_id"));
        assert!(!params.contains("id"));
        assert!(!params.contains("post"));
    }

    #[test]
    fn test_preceding() {
        let params: RouteParameters =
            [("team", "1"), ("user", "2"), ("post", "3")].into_iter().collect();
        assert_eq!(params.preceding("post").and_then(ParameterValue::as_raw), Some("2"));
        assert!(params.preceding("team").is_none());
        assert!(params.preceding("ghost").is_none());
    }

    #[test]
    fn test_remove() {
        let mut params: RouteParameters = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.remove("a").and_then(|v| v.as_raw().map(String::from)), Some("1".into()));
        assert_eq!(params.position("b"), Some(0));
        assert!(params.remove("a").is_none());
    }

    #[test]
    fn test_params_many_params() {
        let mut params = RouteParameters::with_capacity(2);
        for i in 0..10 {
            params.set(format!("key{i}"), format!("value{i}"));
        }

        assert_eq!(params.len(), 10);
        assert_eq!(params.get("key5").and_then(ParameterValue::as_raw), Some("value5"));
    }

    #[test]
    fn test_iter_and_clear() {
        let mut params: RouteParameters = [("a", "1"), ("b", "2")].into_iter().collect();
        let pairs: Vec<_> = (&params).into_iter().map(|(n, v)| (n, v.to_string())).collect();
        assert_eq!(pairs, vec![("a", "1".to_string()), ("b", "2".to_string())]);

        params.clear();
        assert!(params.is_empty());
    }
}
