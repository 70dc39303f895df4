//! Implicit route binding.
//!
//! For every handler parameter whose declared type is bindable, the resolver
//! finds the matching raw value in the route's parameter bag, picks the
//! concrete type to resolve (reading the type tag for polymorphic families),
//! and asks either the prototype instance or the parent object to turn the raw
//! value into a model. The first value that cannot be resolved aborts the pass.

use std::fmt;

use ariadne_core::{
    BindingContainer, BindingError, BindingResult, CapabilitySet, ParameterValue, RoutableRef,
};
use ariadne_signature::HandlerParameter;
use ariadne_telemetry::fields;
use heck::ToSnakeCase;

use crate::{BindableRoute, RouteParameters};

/// Default separator between the type tag and the identifier in polymorphic
/// values (`"photo@42"`).
pub const DEFAULT_POLYMORPHIC_DELIMITER: char = '@';

/// Runtime options for [`ImplicitRouteBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingOptions {
    /// Separator between type tag and identifier in polymorphic values.
    pub polymorphic_delimiter: char,
    /// Also match `postId` against a `post_id` route parameter.
    pub snake_case_fallback: bool,
    /// Reject already-resolved values whose type does not match the declared
    /// parameter type, instead of leaving them untouched.
    pub strict_type_match: bool,
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            polymorphic_delimiter: DEFAULT_POLYMORPHIC_DELIMITER,
            snake_case_fallback: true,
            strict_type_match: false,
        }
    }
}

impl BindingOptions {
    /// Sets the polymorphic delimiter.
    pub fn with_polymorphic_delimiter(mut self, delimiter: char) -> Self {
        self.polymorphic_delimiter = delimiter;
        self
    }

    /// Enables or disables the snake-case name fallback.
    pub fn with_snake_case_fallback(mut self, enabled: bool) -> Self {
        self.snake_case_fallback = enabled;
        self
    }

    /// Enables or disables strict type matching.
    pub fn with_strict_type_match(mut self, enabled: bool) -> Self {
        self.strict_type_match = enabled;
        self
    }
}

/// How a raw value was turned into a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The prototype instance resolved the value itself.
    Direct,
    /// The parent object resolved the value among its children.
    Scoped,
}

impl Strategy {
    /// Returns the strategy name used in log events.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Scoped => "scoped",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the implicit bindings of a route.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use ariadne_core::{Container, Routable, RoutableRef, TypeCatalog};
/// use ariadne_binding::{ImplicitRouteBinding, Route};
/// use ariadne_signature::{Signature, SignatureIntrospector};
///
/// #[derive(Debug, Default)]
/// struct User { id: String }
///
/// impl Routable for User {
///     fn type_name(&self) -> &str { "User" }
///     fn route_key(&self) -> String { self.id.clone() }
///     fn resolve_route_binding(&self, value: &str, _field: Option<&str>) -> Option<RoutableRef> {
///         Some(Arc::new(User { id: value.to_string() }))
///     }
///     fn as_any(&self) -> &dyn Any { self }
/// }
///
/// let catalog = Arc::new(TypeCatalog::new().routable("User"));
/// let mut container = Container::new(catalog.clone());
/// container.register_default::<User>("User");
///
/// let introspector = Arc::new(
///     SignatureIntrospector::new(catalog)
///         .with_method("UserController", "show", Signature::new().param("user", "User")),
/// );
///
/// let mut route = Route::action("/users/{user}", "UserController#show", introspector).unwrap();
/// route.bind([("user", "7")]);
///
/// ImplicitRouteBinding::new().resolve_for_route(&container, &mut route).unwrap();
///
/// let user = route.parameter("user").and_then(|v| v.downcast_ref::<User>()).unwrap();
/// assert_eq!(user.id, "7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImplicitRouteBinding {
    options: BindingOptions,
}

impl ImplicitRouteBinding {
    /// Creates a resolver with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with the given options.
    #[must_use]
    pub fn with_options(options: BindingOptions) -> Self {
        Self { options }
    }

    /// Returns the resolver options.
    #[must_use]
    pub fn options(&self) -> &BindingOptions {
        &self.options
    }

    /// Resolves every bindable handler parameter of `route` in place.
    ///
    /// Parameters are processed in declaration order. Values that already hold
    /// a model are left alone. On the first failure the pass stops; parameters
    /// committed before it keep their resolved values.
    ///
    /// # Errors
    ///
    /// - [`BindingError::Reflection`] if the handler signature is unavailable
    /// - [`BindingError::MalformedPolymorphicValue`] if a polymorphic value has
    ///   no type tag
    /// - [`BindingError::Construction`] if the container cannot build the type
    /// - [`BindingError::ModelNotFound`] if no model matches a raw value
    /// - [`BindingError::TypeMismatch`] with strict type matching only
    pub fn resolve_for_route<C, R>(&self, container: &C, route: &mut R) -> BindingResult<()>
    where
        C: BindingContainer + ?Sized,
        R: BindableRoute + ?Sized,
    {
        let span = tracing::debug_span!("implicit_route_binding", { fields::ROUTE } = %route.uri());
        let _guard = span.enter();

        // Raw values come from the bag as it was before this pass.
        let parameters = route.parameters().clone();
        let signature = route.signature_parameters(Some(&CapabilitySet::bindable()))?;

        for parameter in &signature {
            let Some(name) = self.parameter_name(parameter.name(), &parameters) else {
                tracing::trace!(
                    { fields::PARAMETER } = parameter.name(),
                    "no captured value, leaving parameter to the container"
                );
                continue;
            };
            let Some(declared) = parameter.declared_type() else {
                continue;
            };

            let raw = match parameters.get(name) {
                Some(ParameterValue::Raw(raw)) => raw.as_str(),
                Some(ParameterValue::Model(model)) => {
                    self.check_resolved(container, parameter, name, model)?;
                    continue;
                }
                None => continue,
            };

            let model = self.resolve_parameter(container, &*route, name, declared, raw)?;
            route.set_parameter(name, ParameterValue::Model(model));
        }

        Ok(())
    }

    fn resolve_parameter<C, R>(
        &self,
        container: &C,
        route: &R,
        name: &str,
        declared: &str,
        raw: &str,
    ) -> BindingResult<RoutableRef>
    where
        C: BindingContainer + ?Sized,
        R: BindableRoute + ?Sized,
    {
        let (type_name, raw) = self.concrete_type(container, name, declared, raw)?;
        let instance = container.make(&type_name)?;
        let field = route.binding_field_for(name);

        let scoped_parent = route
            .parent_of_parameter(name)
            .and_then(ParameterValue::as_model)
            .filter(|_| route.binding_fields().contains_key(name));

        let (strategy, resolved) = match scoped_parent {
            Some(parent) => (
                Strategy::Scoped,
                parent.resolve_child_route_binding(name, raw, field),
            ),
            None => (Strategy::Direct, instance.resolve_route_binding(raw, field)),
        };

        match resolved {
            Some(model) => {
                tracing::debug!(
                    { fields::PARAMETER } = name,
                    { fields::TYPE_NAME } = instance.type_name(),
                    { fields::RAW_VALUE } = raw,
                    { fields::STRATEGY } = %strategy,
                    "resolved route binding"
                );
                Ok(model)
            }
            None => {
                tracing::warn!(
                    { fields::PARAMETER } = name,
                    { fields::TYPE_NAME } = instance.type_name(),
                    { fields::RAW_VALUE } = raw,
                    { fields::STRATEGY } = %strategy,
                    "no model matched route parameter"
                );
                Err(BindingError::model_not_found(instance.type_name(), [raw]))
            }
        }
    }

    /// Finds the bag key for a handler parameter: the exact name, then its
    /// snake-cased form.
    fn parameter_name<'a>(&self, name: &str, parameters: &'a RouteParameters) -> Option<&'a str> {
        let exact = parameters.names().find(|candidate| *candidate == name);
        if exact.is_some() || !self.options.snake_case_fallback {
            return exact;
        }

        let snaked = name.to_snake_case();
        parameters.names().find(|candidate| *candidate == snaked)
    }

    /// Returns the concrete type to instantiate and the raw value to resolve.
    fn concrete_type<'v, C>(
        &self,
        container: &C,
        name: &str,
        declared: &str,
        raw: &'v str,
    ) -> BindingResult<(String, &'v str)>
    where
        C: BindingContainer + ?Sized,
    {
        if !container.catalog().is_polymorphic(declared) {
            return Ok((declared.to_string(), raw));
        }

        let delimiter = self.options.polymorphic_delimiter;
        let (tag, identifier) = raw
            .split_once(delimiter)
            .filter(|(tag, _)| !tag.is_empty())
            .ok_or_else(|| BindingError::malformed_polymorphic(name, raw, delimiter))?;

        let type_name = container.lookup_concrete_type(tag).unwrap_or(tag);
        tracing::trace!(
            { fields::PARAMETER } = name,
            { fields::TAG } = tag,
            { fields::TYPE_NAME } = type_name,
            "read polymorphic type tag"
        );

        Ok((type_name.to_string(), identifier))
    }

    fn check_resolved<C>(
        &self,
        container: &C,
        parameter: &HandlerParameter,
        name: &str,
        model: &RoutableRef,
    ) -> BindingResult<()>
    where
        C: BindingContainer + ?Sized,
    {
        if self.options.strict_type_match {
            if let Some(declared) = parameter.declared_type() {
                if !container.catalog().is_assignable(model.type_name(), declared) {
                    return Err(BindingError::type_mismatch(name, declared, model.type_name()));
                }
            }
        }

        tracing::trace!(
            { fields::PARAMETER } = name,
            { fields::TYPE_NAME } = model.type_name(),
            "parameter already resolved"
        );
        Ok(())
    }
}

/// Resolves the implicit bindings of `route` with default options.
///
/// Shorthand for [`ImplicitRouteBinding::new`] followed by
/// [`ImplicitRouteBinding::resolve_for_route`].
pub fn resolve_for_route<C, R>(container: &C, route: &mut R) -> BindingResult<()>
where
    C: BindingContainer + ?Sized,
    R: BindableRoute + ?Sized,
{
    ImplicitRouteBinding::new().resolve_for_route(container, route)
}
