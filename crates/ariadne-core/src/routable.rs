//! Routable domain objects and route parameter values.
//!
//! A [`Routable`] is any domain object that knows how to look itself up from a
//! raw value captured from a URL. Route parameter bags hold
//! [`ParameterValue`]s, which are either the raw captured string or an object
//! that has already been resolved.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A shared handle to a resolved routable object.
pub type RoutableRef = Arc<dyn Routable>;

/// A domain object that can be resolved from a raw route value.
///
/// Instances produced by a [`ResolutionContainer`](crate::ResolutionContainer)
/// act as *prototypes*: they receive the resolution call and return the real
/// object, or `None` when nothing matches. Lookups may block (for example on a
/// database query); the resolver treats each call as a plain synchronous
/// function.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use ariadne_core::{Routable, RoutableRef};
///
/// #[derive(Debug, Default)]
/// struct User {
///     id: u64,
/// }
///
/// impl Routable for User {
///     fn type_name(&self) -> &str {
///         "User"
///     }
///
///     fn route_key(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn resolve_route_binding(&self, value: &str, _field: Option<&str>) -> Option<RoutableRef> {
///         let id = value.parse().ok()?;
///         Some(Arc::new(User { id }))
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let user = User::default().resolve_route_binding("7", None).unwrap();
/// assert_eq!(user.route_key(), "7");
/// assert_eq!(user.downcast_ref::<User>().map(|u| u.id), Some(7));
/// ```
pub trait Routable: fmt::Debug + Send + Sync + 'static {
    /// Returns the type identifier this object was registered under.
    fn type_name(&self) -> &str;

    /// Returns the name of the attribute used for lookups by default.
    fn route_key_name(&self) -> &str {
        "id"
    }

    /// Returns the value of the route key for this object.
    fn route_key(&self) -> String;

    /// Resolves `value` against the default route key, or `field` if given.
    fn resolve_route_binding(&self, value: &str, field: Option<&str>) -> Option<RoutableRef>;

    /// Resolves a child binding scoped to this object.
    ///
    /// `parameter` is the child route parameter name (e.g. `post` for
    /// `/users/{user}/posts/{post:slug}`). Types that own children override
    /// this; the default finds nothing.
    fn resolve_child_route_binding(
        &self,
        parameter: &str,
        value: &str,
        field: Option<&str>,
    ) -> Option<RoutableRef> {
        let _ = (parameter, value, field);
        None
    }

    /// Returns `self` as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Routable {
    /// Returns a reference to the concrete type if it is `T`.
    pub fn downcast_ref<T: Routable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the concrete type is `T`.
    pub fn is<T: Routable>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// The value held by a route parameter.
#[derive(Clone)]
pub enum ParameterValue {
    /// The raw string captured from the URL.
    Raw(String),
    /// An object resolved by an earlier phase or injected explicitly.
    Model(RoutableRef),
}

impl ParameterValue {
    /// Creates a raw value.
    #[must_use]
    pub fn raw(value: impl Into<String>) -> Self {
        Self::Raw(value.into())
    }

    /// Wraps a resolved object.
    #[must_use]
    pub fn model(model: impl Routable) -> Self {
        Self::Model(Arc::new(model))
    }

    /// Returns the raw string, if this value is unresolved.
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(raw) => Some(raw),
            Self::Model(_) => None,
        }
    }

    /// Returns the resolved object, if any.
    #[must_use]
    pub fn as_model(&self) -> Option<&RoutableRef> {
        match self {
            Self::Raw(_) => None,
            Self::Model(model) => Some(model),
        }
    }

    /// Returns `true` if the value satisfies the `Routable` capability.
    #[must_use]
    pub fn is_routable(&self) -> bool {
        matches!(self, Self::Model(_))
    }

    /// Downcasts a resolved value to a concrete type.
    #[must_use]
    pub fn downcast_ref<T: Routable>(&self) -> Option<&T> {
        self.as_model().and_then(|m| m.downcast_ref::<T>())
    }
}

impl fmt::Debug for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Self::Model(model) => write!(f, "Model({}#{})", model.type_name(), model.route_key()),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => f.write_str(raw),
            Self::Model(model) => write!(f, "{}#{}", model.type_name(), model.route_key()),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<RoutableRef> for ParameterValue {
    fn from(model: RoutableRef) -> Self {
        Self::Model(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tag(&'static str);

    impl Routable for Tag {
        fn type_name(&self) -> &str {
            "Tag"
        }

        fn route_key_name(&self) -> &str {
            "slug"
        }

        fn route_key(&self) -> String {
            self.0.to_string()
        }

        fn resolve_route_binding(&self, value: &str, _field: Option<&str>) -> Option<RoutableRef> {
            (value == "rust").then(|| Arc::new(Tag("rust")) as RoutableRef)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_raw_value() {
        let value = ParameterValue::raw("42");
        assert_eq!(value.as_raw(), Some("42"));
        assert!(!value.is_routable());
        assert!(value.as_model().is_none());
        assert_eq!(value.to_string(), "42");
    }

    #[test]
    fn test_model_value() {
        let value = ParameterValue::model(Tag("rust"));
        assert!(value.is_routable());
        assert!(value.as_raw().is_none());
        assert_eq!(value.to_string(), "Tag#rust");
        assert_eq!(format!("{value:?}"), "Model(Tag#rust)");
        assert_eq!(value.downcast_ref::<Tag>().map(|t| t.0), Some("rust"));
    }

    #[test]
    fn test_default_child_binding_finds_nothing() {
        let tag = Tag("rust");
        assert!(tag.resolve_child_route_binding("post", "1", None).is_none());
        assert_eq!(tag.route_key_name(), "slug");
    }

    #[test]
    fn test_resolve_route_binding() {
        let prototype = Tag("");
        let found = prototype.resolve_route_binding("rust", None);
        assert!(found.is_some_and(|t| t.is::<Tag>()));
        assert!(prototype.resolve_route_binding("go", None).is_none());
    }
}
