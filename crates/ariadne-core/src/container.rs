//! Resolution container.
//!
//! The container turns a type identifier into a fresh prototype instance. The
//! prototype is only the receiver of a resolution call; the object that ends
//! up in the route is whatever the prototype returns.
//!
//! Factories are registered once at application startup, keyed by the same
//! identifiers handler signatures use.
//!
//! # Example
//!
//! ```rust
//! use std::any::Any;
//! use std::sync::Arc;
//! use ariadne_core::{Container, ResolutionContainer, Routable, RoutableRef, TypeCatalog};
//!
//! #[derive(Debug, Default)]
//! struct User;
//!
//! impl Routable for User {
//!     fn type_name(&self) -> &str { "User" }
//!     fn route_key(&self) -> String { String::new() }
//!     fn resolve_route_binding(&self, _: &str, _: Option<&str>) -> Option<RoutableRef> { None }
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! let catalog = Arc::new(TypeCatalog::new().routable("User"));
//! let mut container = Container::new(catalog);
//! container.register_default::<User>("User");
//!
//! let prototype = container.make("User").unwrap();
//! assert_eq!(prototype.type_name(), "User");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{
    BindingError, BindingResult, MorphMap, PolymorphicTypeRegistry, Routable, RoutableRef,
    TypeCatalog, TypeKind,
};

/// Produces prototype instances by type identifier.
pub trait ResolutionContainer {
    /// Creates a prototype instance of `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Construction`] if the type cannot be built.
    fn make(&self, type_name: &str) -> BindingResult<RoutableRef>;
}

/// Everything the implicit binding resolver needs from its container.
pub trait BindingContainer: ResolutionContainer + PolymorphicTypeRegistry {
    /// Returns the catalog used to classify declared types.
    fn catalog(&self) -> &TypeCatalog;
}

type Factory = Arc<dyn Fn() -> anyhow::Result<RoutableRef> + Send + Sync>;

/// Default [`BindingContainer`] backed by registered factories.
///
/// # Thread Safety
///
/// The container is `Send + Sync` and is meant to be built at startup and
/// shared read-only across requests.
#[derive(Clone)]
pub struct Container {
    catalog: Arc<TypeCatalog>,
    factories: HashMap<String, Factory>,
    morphs: MorphMap,
}

impl Container {
    /// Creates a container over a type catalog.
    #[must_use]
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            catalog,
            factories: HashMap::new(),
            morphs: MorphMap::new(),
        }
    }

    /// Registers a fallible factory for a type identifier.
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        F: Fn() -> anyhow::Result<RoutableRef> + Send + Sync + 'static,
    {
        self.factories.insert(type_name.into(), Arc::new(factory));
    }

    /// Registers `T::default()` as the factory for a type identifier.
    pub fn register_default<T: Routable + Default>(&mut self, type_name: impl Into<String>) {
        self.register(type_name, || Ok(Arc::new(T::default()) as RoutableRef));
    }

    /// Registers a shared instance that is handed out on every `make`.
    pub fn register_instance(&mut self, type_name: impl Into<String>, instance: RoutableRef) {
        self.register(type_name, move || Ok(Arc::clone(&instance)));
    }

    /// Replaces the morph map used for polymorphic tags.
    #[must_use]
    pub fn with_morph_map(mut self, morphs: MorphMap) -> Self {
        self.morphs = morphs;
        self
    }

    /// Registers a polymorphic tag for a concrete type.
    pub fn morph(&mut self, tag: impl Into<String>, type_name: impl Into<String>) {
        self.morphs.insert(tag, type_name);
    }

    /// Returns the morph map.
    #[must_use]
    pub fn morph_map(&self) -> &MorphMap {
        &self.morphs
    }

    /// Returns a shared handle to the catalog.
    #[must_use]
    pub fn catalog_handle(&self) -> Arc<TypeCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Checks if a factory is registered for a type identifier.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no factories are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl ResolutionContainer for Container {
    fn make(&self, type_name: &str) -> BindingResult<RoutableRef> {
        if self
            .catalog
            .get(type_name)
            .is_some_and(|decl| decl.kind() == TypeKind::Interface)
        {
            return Err(BindingError::construction(
                type_name,
                anyhow::anyhow!("interfaces cannot be instantiated"),
            ));
        }

        let factory = self.factories.get(type_name).ok_or_else(|| {
            BindingError::construction(type_name, anyhow::anyhow!("no factory registered"))
        })?;

        factory().map_err(|e| BindingError::construction(type_name, e))
    }
}

impl PolymorphicTypeRegistry for Container {
    fn lookup_concrete_type(&self, tag: &str) -> Option<&str> {
        self.morphs.lookup_concrete_type(tag)
    }
}

impl BindingContainer for Container {
    fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("type_count", &self.catalog.len())
            .field("factory_count", &self.factories.len())
            .field("morphs", &self.morphs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    #[derive(Debug, Default)]
    struct Photo {
        id: u64,
    }

    impl Routable for Photo {
        fn type_name(&self) -> &str {
            "Photo"
        }

        fn route_key(&self) -> String {
            self.id.to_string()
        }

        fn resolve_route_binding(&self, value: &str, _field: Option<&str>) -> Option<RoutableRef> {
            let id = value.parse().ok()?;
            Some(Arc::new(Photo { id }))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn container() -> Container {
        let catalog = TypeCatalog::new()
            .polymorphic("Imageable")
            .routable_implementing("Photo", ["Imageable"]);
        Container::new(Arc::new(catalog))
    }

    #[test]
    fn test_container_new() {
        let container = container();
        assert!(container.is_empty());
        assert_eq!(container.len(), 0);
    }

    #[test]
    fn test_make_registered() {
        let mut container = container();
        container.register_default::<Photo>("Photo");

        let prototype = container.make("Photo").unwrap();
        assert!(prototype.is::<Photo>());
        assert!(container.contains("Photo"));
    }

    #[test]
    fn test_make_unregistered() {
        let container = container();
        let err = container.make("Photo").unwrap_err();
        assert!(matches!(err, BindingError::Construction { ref type_name, .. } if type_name == "Photo"));
    }

    #[test]
    fn test_make_interface_rejected() {
        let mut container = container();
        container.register_default::<Photo>("Imageable");

        let err = container.make("Imageable").unwrap_err();
        assert!(err.to_string().contains("Imageable"));
    }

    #[test]
    fn test_factory_error_propagates() {
        let mut container = container();
        container.register("Photo", || Err(anyhow::anyhow!("storage offline")));

        let err = container.make("Photo").unwrap_err();
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("storage offline"));
    }

    #[test]
    fn test_register_instance_is_shared() {
        let mut container = container();
        let shared: RoutableRef = Arc::new(Photo { id: 3 });
        container.register_instance("Photo", Arc::clone(&shared));

        let made = container.make("Photo").unwrap();
        assert!(Arc::ptr_eq(&made, &shared));
    }

    #[test]
    fn test_morph_lookup() {
        let mut container = container();
        container.morph("photo", "Photo");
        assert_eq!(container.lookup_concrete_type("photo"), Some("Photo"));
        assert_eq!(container.lookup_concrete_type("video"), None);
    }

    #[test]
    fn test_container_debug() {
        let debug = format!("{:?}", container());
        assert!(debug.contains("Container"));
        assert!(debug.contains("factory_count"));
    }
}
