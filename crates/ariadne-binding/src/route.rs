//! Routes as seen by the binding phase.
//!
//! A [`Route`] couples a URI pattern with its handler and carries the
//! parameter bag captured by the external matcher. The resolver only talks to
//! it through [`BindableRoute`], so dispatchers with their own route type can
//! implement that trait instead.

use std::collections::HashMap;
use std::sync::Arc;

use ariadne_core::{BindingContainer, BindingError, BindingResult, CapabilitySet, ParameterValue};
use ariadne_signature::{HandlerDescriptor, HandlerParameter, SignatureIntrospector};
use indexmap::IndexMap;

use crate::{ImplicitRouteBinding, RouteParameters};

/// The accessors the resolver needs from a route.
pub trait BindableRoute {
    /// Returns the URI pattern, for diagnostics.
    fn uri(&self) -> &str;

    /// Returns the current parameter bag.
    fn parameters(&self) -> &RouteParameters;

    /// Returns the handler's formal parameters, optionally filtered by
    /// capability.
    fn signature_parameters(
        &self,
        filter: Option<&CapabilitySet>,
    ) -> BindingResult<Vec<HandlerParameter>>;

    /// Returns the current value of the parameter `name` is nested under.
    fn parent_of_parameter(&self, name: &str) -> Option<&ParameterValue>;

    /// Returns every registered binding-field override.
    fn binding_fields(&self) -> &IndexMap<String, String>;

    /// Returns the binding-field override for one parameter.
    fn binding_field_for(&self, name: &str) -> Option<&str> {
        self.binding_fields().get(name).map(String::as_str)
    }

    /// Replaces the value of a parameter.
    fn set_parameter(&mut self, name: &str, value: ParameterValue);
}

/// A `{placeholder}` in a route URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSegment {
    name: String,
    optional: bool,
}

impl RouteSegment {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for `{name?}` placeholders.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// A route with its handler and captured parameters.
///
/// Placeholders are written `{name}`, `{name?}` for optional segments and
/// `{name:field}` to bind against `field` instead of the model's route key.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ariadne_core::TypeCatalog;
/// use ariadne_binding::{BindableRoute, Route};
/// use ariadne_signature::{Signature, SignatureIntrospector};
///
/// let introspector = Arc::new(
///     SignatureIntrospector::new(Arc::new(TypeCatalog::new().routable("User").routable("Post")))
///         .with_method("PostController", "show", Signature::new().param("user", "User").param("post", "Post")),
/// );
///
/// let mut route = Route::action("/users/{user}/posts/{post:slug}", "PostController#show", introspector).unwrap();
/// route.bind([("user", "5"), ("post", "hello-world")]);
///
/// assert_eq!(route.binding_field_for("post"), Some("slug"));
/// assert_eq!(route.parent_of_parameter("post").and_then(|v| v.as_raw()), Some("5"));
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    uri: String,
    handler: HandlerDescriptor,
    introspector: Arc<SignatureIntrospector>,
    segments: Vec<RouteSegment>,
    binding_fields: IndexMap<String, String>,
    parents: HashMap<String, String>,
    parameters: RouteParameters,
}

impl Route {
    /// Creates a route for a handler.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InvalidRoutePattern`] if the URI placeholders are
    /// malformed.
    pub fn new(
        uri: impl Into<String>,
        handler: HandlerDescriptor,
        introspector: Arc<SignatureIntrospector>,
    ) -> BindingResult<Self> {
        let uri = uri.into();
        let (segments, binding_fields) = parse_pattern(&uri)?;

        Ok(Self {
            uri,
            handler,
            introspector,
            segments,
            binding_fields,
            parents: HashMap::new(),
            parameters: RouteParameters::new(),
        })
    }

    /// Creates a route for a `"Type#method"` handler string.
    pub fn action(
        uri: impl Into<String>,
        uses: &str,
        introspector: Arc<SignatureIntrospector>,
    ) -> BindingResult<Self> {
        Self::new(uri, HandlerDescriptor::parse(uses)?, introspector)
    }

    /// Returns the handler descriptor.
    #[must_use]
    pub fn handler(&self) -> &HandlerDescriptor {
        &self.handler
    }

    /// Returns the URI placeholders in order.
    #[must_use]
    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// Loads the values captured by the matcher.
    ///
    /// Values are stored in placeholder order regardless of the order they are
    /// given in. Names that are not placeholders are appended after them.
    /// Placeholders without a captured value are left out, whether optional or
    /// not.
    pub fn bind<I, K, V>(&mut self, captured: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParameterValue>,
    {
        let mut captured: RouteParameters = captured.into_iter().collect();
        self.parameters.clear();

        for segment in &self.segments {
            if let Some(value) = captured.remove(&segment.name) {
                self.parameters.set(segment.name.clone(), value);
            }
        }
        for (name, value) in &captured {
            self.parameters.set(name, value.clone());
        }

        self
    }

    /// Records `parent` as the parameter `child` is scoped to.
    ///
    /// Without an explicit parent, a parameter is nested under the one before
    /// it.
    pub fn set_parent(&mut self, child: impl Into<String>, parent: impl Into<String>) {
        self.parents.insert(child.into(), parent.into());
    }

    /// Records a parent and returns the route, for chaining.
    #[must_use]
    pub fn with_parent(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        self.set_parent(child, parent);
        self
    }

    /// Registers a binding-field override outside the URI pattern.
    #[must_use]
    pub fn with_binding_field(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.binding_fields.insert(name.into(), field.into());
        self
    }

    /// Returns the value of one parameter.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    /// Removes a parameter from the bag.
    pub fn forget_parameter(&mut self, name: &str) -> Option<ParameterValue> {
        self.parameters.remove(name)
    }

    /// Resolves the route's implicit bindings with default options.
    pub fn resolve_bindings<C>(&mut self, container: &C) -> BindingResult<()>
    where
        C: BindingContainer + ?Sized,
    {
        ImplicitRouteBinding::new().resolve_for_route(container, self)
    }
}

impl BindableRoute for Route {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn parameters(&self) -> &RouteParameters {
        &self.parameters
    }

    fn signature_parameters(
        &self,
        filter: Option<&CapabilitySet>,
    ) -> BindingResult<Vec<HandlerParameter>> {
        self.introspector.extract_parameters(&self.handler, filter)
    }

    fn parent_of_parameter(&self, name: &str) -> Option<&ParameterValue> {
        match self.parents.get(name) {
            Some(parent) => self.parameters.get(parent),
            None => self.parameters.preceding(name),
        }
    }

    fn binding_fields(&self) -> &IndexMap<String, String> {
        &self.binding_fields
    }

    fn set_parameter(&mut self, name: &str, value: ParameterValue) {
        self.parameters.set(name, value);
    }
}

/// Extracts placeholders and binding fields from a URI pattern.
fn parse_pattern(uri: &str) -> BindingResult<(Vec<RouteSegment>, IndexMap<String, String>)> {
    let mut segments: Vec<RouteSegment> = Vec::new();
    let mut binding_fields = IndexMap::new();
    let mut open = None;

    for (index, c) in uri.char_indices() {
        match c {
            '{' if open.is_some() => {
                return Err(BindingError::invalid_route_pattern(uri, "nested '{'"));
            }
            '{' => open = Some(index),
            '}' => {
                let start = open
                    .take()
                    .ok_or_else(|| BindingError::invalid_route_pattern(uri, "unmatched '}'"))?;
                let placeholder = &uri[start + 1..index];
                let (segment, field) = parse_placeholder(uri, placeholder)?;

                if segments.iter().any(|s| s.name == segment.name) {
                    return Err(BindingError::invalid_route_pattern(
                        uri,
                        format!("duplicate parameter '{}'", segment.name),
                    ));
                }
                if let Some(field) = field {
                    binding_fields.insert(segment.name.clone(), field);
                }
                segments.push(segment);
            }
            _ => {}
        }
    }

    if open.is_some() {
        return Err(BindingError::invalid_route_pattern(uri, "unclosed '{'"));
    }

    Ok((segments, binding_fields))
}

fn parse_placeholder(uri: &str, placeholder: &str) -> BindingResult<(RouteSegment, Option<String>)> {
    let (body, optional) = match placeholder.strip_suffix('?') {
        Some(body) => (body, true),
        None => (placeholder, false),
    };
    let (name, field) = match body.split_once(':') {
        Some((name, field)) => (name, Some(field)),
        None => (body, None),
    };

    let valid = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !valid(name) {
        return Err(BindingError::invalid_route_pattern(
            uri,
            format!("invalid parameter name '{name}'"),
        ));
    }
    if field.is_some_and(|f| !valid(f)) {
        return Err(BindingError::invalid_route_pattern(
            uri,
            format!("invalid binding field for '{name}'"),
        ));
    }

    let segment = RouteSegment {
        name: name.to_string(),
        optional,
    };
    Ok((segment, field.map(ToString::to_string)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_core::TypeCatalog;
    use ariadne_signature::Signature;

    fn introspector() -> Arc<SignatureIntrospector> {
        Arc::new(
            SignatureIntrospector::new(Arc::new(TypeCatalog::new().routable("User")))
                .with_method("UserController", "show", Signature::new().param("user", "User")),
        )
    }

    fn route(uri: &str) -> Route {
        Route::action(uri, "UserController#show", introspector()).unwrap()
    }

    #[test]
    fn test_parse_segments() {
        let route = route("/teams/{team}/users/{user?}");
        let names: Vec<_> = route.segments().iter().map(RouteSegment::name).collect();
        assert_eq!(names, vec!["team", "user"]);
        assert!(!route.segments()[0].is_optional());
        assert!(route.segments()[1].is_optional());
        assert!(route.binding_fields().is_empty());
    }

    #[test]
    fn test_parse_binding_fields() {
        let route = route("/users/{user:uuid}/posts/{post:slug?}");
        assert_eq!(route.binding_field_for("user"), Some("uuid"));
        assert_eq!(route.binding_field_for("post"), Some("slug"));
        assert!(route.segments()[1].is_optional());
        assert_eq!(route.binding_field_for("team"), None);
    }

    #[test]
    fn test_parse_invalid_patterns() {
        for uri in [
            "/users/{user",
            "/users/user}",
            "/users/{{user}}",
            "/users/{}",
            "/users/{user:}",
            "/users/{user}/{user}",
            "/users/{us-er}",
        ] {
            let err = Route::action(uri, "UserController#show", introspector()).unwrap_err();
            assert!(
                matches!(err, BindingError::InvalidRoutePattern { .. }),
                "expected pattern error for {uri}"
            );
        }
    }

    #[test]
    fn test_bind_orders_by_pattern() {
        let mut route = route("/teams/{team}/users/{user}");
        route.bind([("user", "2"), ("extra", "x"), ("team", "1")]);

        let names: Vec<_> = route.parameters().names().collect();
        assert_eq!(names, vec!["team", "user", "extra"]);
    }

    #[test]
    fn test_bind_skips_missing_optional() {
        let mut route = route("/users/{user}/{tab?}");
        route.bind([("user", "2")]);
        assert_eq!(route.parameters().len(), 1);
        assert!(route.parameter("tab").is_none());
    }

    #[test]
    fn test_bind_skips_missing_required() {
        let mut route = route("/teams/{team}/users/{user}");
        route.bind([("team", "1")]);

        let names: Vec<_> = route.parameters().names().collect();
        assert_eq!(names, vec!["team"]);
        assert!(route.parameter("user").is_none());
    }

    #[test]
    fn test_positional_parent() {
        let mut route = route("/teams/{team}/users/{user}");
        route.bind([("team", "1"), ("user", "2")]);

        assert_eq!(
            route.parent_of_parameter("user").and_then(ParameterValue::as_raw),
            Some("1")
        );
        assert!(route.parent_of_parameter("team").is_none());
    }

    #[test]
    fn test_explicit_parent_wins() {
        let mut route = route("/teams/{team}/users/{user}/posts/{post}").with_parent("post", "team");
        route.bind([("team", "1"), ("user", "2"), ("post", "3")]);

        assert_eq!(
            route.parent_of_parameter("post").and_then(ParameterValue::as_raw),
            Some("1")
        );
    }

    #[test]
    fn test_binding_field_override() {
        let route = route("/users/{user}").with_binding_field("user", "email");
        assert_eq!(route.binding_field_for("user"), Some("email"));
    }

    #[test]
    fn test_set_and_forget_parameter() {
        let mut route = route("/users/{user}");
        route.bind([("user", "2")]);
        route.set_parameter("user", ParameterValue::raw("3"));
        assert_eq!(route.parameter("user").and_then(ParameterValue::as_raw), Some("3"));

        assert!(route.forget_parameter("user").is_some());
        assert!(route.parameters().is_empty());
    }

    #[test]
    fn test_signature_parameters_delegates() {
        let route = route("/users/{user}");
        let parameters = route.signature_parameters(None).unwrap();
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].name(), "user");
    }
}
