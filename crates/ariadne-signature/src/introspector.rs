//! Signature introspection.
//!
//! Handler signatures are registered explicitly (or generated by
//! `#[route_signature]`) instead of being reflected at runtime. The
//! [`SignatureIntrospector`] answers "what parameters does this handler
//! declare?" and optionally keeps only those whose declared type carries one of
//! a set of capabilities.

use std::collections::HashMap;
use std::sync::Arc;

use ariadne_core::{BindingError, BindingResult, CapabilitySet, TypeCatalog};
use ariadne_telemetry::fields;

use crate::{HandlerDescriptor, HandlerParameter, Signature};

/// Methods registered for one handler type.
#[derive(Debug, Clone, Default)]
struct HandlerType {
    methods: HashMap<String, Signature>,
    /// The type answers calls to methods it does not declare.
    dynamic_calls: bool,
}

/// Produces the ordered parameter list of route handlers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ariadne_core::{CapabilitySet, TypeCatalog};
/// use ariadne_signature::{HandlerDescriptor, Signature, SignatureIntrospector};
///
/// let catalog = Arc::new(TypeCatalog::new().routable("User").service("Mailer"));
/// let introspector = SignatureIntrospector::new(catalog).with_method(
///     "UserController",
///     "show",
///     Signature::new().param("mailer", "Mailer").param("user", "User").untyped("tab"),
/// );
///
/// let handler = HandlerDescriptor::parse("UserController#show").unwrap();
///
/// let all = introspector.extract_parameters(&handler, None).unwrap();
/// assert_eq!(all.len(), 3);
///
/// let bindable = introspector
///     .extract_parameters(&handler, Some(&CapabilitySet::bindable()))
///     .unwrap();
/// assert_eq!(bindable.len(), 1);
/// assert_eq!(bindable[0].name(), "user");
/// ```
#[derive(Debug, Clone)]
pub struct SignatureIntrospector {
    catalog: Arc<TypeCatalog>,
    types: HashMap<String, HandlerType>,
}

impl SignatureIntrospector {
    /// Creates an introspector that classifies declared types with `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            catalog,
            types: HashMap::new(),
        }
    }

    /// Registers the signature of `type_name::method`.
    pub fn register_method(
        &mut self,
        type_name: impl Into<String>,
        method: impl Into<String>,
        signature: Signature,
    ) {
        self.types
            .entry(type_name.into())
            .or_default()
            .methods
            .insert(method.into(), signature);
    }

    /// Registers a method signature and returns the introspector, for chaining.
    #[must_use]
    pub fn with_method(
        mut self,
        type_name: impl Into<String>,
        method: impl Into<String>,
        signature: Signature,
    ) -> Self {
        self.register_method(type_name, method, signature);
        self
    }

    /// Marks `type_name` as answering calls to methods it does not declare.
    ///
    /// Handlers naming such a method have no signature to inspect, so implicit
    /// binding is skipped for them.
    pub fn register_dynamic_calls(&mut self, type_name: impl Into<String>) {
        self.types.entry(type_name.into()).or_default().dynamic_calls = true;
    }

    /// Marks a type as dynamic and returns the introspector, for chaining.
    #[must_use]
    pub fn with_dynamic_calls(mut self, type_name: impl Into<String>) -> Self {
        self.register_dynamic_calls(type_name);
        self
    }

    /// Returns the catalog used for capability filtering.
    #[must_use]
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Returns the ordered formal parameters of `handler`.
    ///
    /// When `filter` is given, only parameters whose declared type is one of
    /// the filter's capability identifiers, or a type carrying one of them,
    /// are kept. Untyped parameters are dropped when filtering.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Reflection`] if the handler type is unknown, the
    /// method does not exist on a type without dynamic calls, or the
    /// registered signature is malformed.
    pub fn extract_parameters(
        &self,
        handler: &HandlerDescriptor,
        filter: Option<&CapabilitySet>,
    ) -> BindingResult<Vec<HandlerParameter>> {
        let Some(signature) = self.reflect(handler)? else {
            return Ok(Vec::new());
        };

        signature
            .validate()
            .map_err(|reason| BindingError::reflection(handler.to_string(), reason))?;

        let parameters = signature
            .iter()
            .filter(|p| filter.map_or(true, |f| self.satisfies(p, f)))
            .cloned()
            .collect();

        Ok(parameters)
    }

    /// Looks up the declared signature. `Ok(None)` means the handler is
    /// invocable but has no signature to inspect.
    fn reflect<'a>(&'a self, handler: &'a HandlerDescriptor) -> BindingResult<Option<&'a Signature>> {
        let (type_name, method) = match handler {
            HandlerDescriptor::Callable(signature) => return Ok(Some(signature)),
            HandlerDescriptor::Method { type_name, method } => (type_name, method),
        };

        let handler_type = self.types.get(type_name).ok_or_else(|| {
            BindingError::reflection(handler.to_string(), "handler type is not registered")
        })?;

        match handler_type.methods.get(method) {
            Some(signature) => Ok(Some(signature)),
            None if handler_type.dynamic_calls => {
                tracing::debug!(
                    { fields::HANDLER } = %handler,
                    "method is dispatched dynamically, skipping signature introspection"
                );
                Ok(None)
            }
            None => Err(BindingError::reflection(
                handler.to_string(),
                format!("method '{method}' does not exist on '{type_name}'"),
            )),
        }
    }

    fn satisfies(&self, parameter: &HandlerParameter, filter: &CapabilitySet) -> bool {
        parameter
            .declared_type()
            .is_some_and(|ty| self.catalog.satisfies(ty, filter))
    }
}
