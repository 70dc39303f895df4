//! Type catalog.
//!
//! The catalog records every type identifier the binding layer may see in a
//! handler signature, together with its kind, the capabilities it was
//! registered with and the interfaces it implements. It replaces runtime type
//! introspection: "is `Photo` routable?" and "does `Photo` belong to the
//! `Imageable` family?" are table lookups.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;

use crate::{Capability, CapabilitySet};

/// Whether a declared type is concrete or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A concrete type that can be instantiated.
    Concrete,
    /// An interface; it can only be named in signatures.
    Interface,
}

/// A single type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    name: String,
    kind: TypeKind,
    capabilities: CapabilitySet,
    implements: Vec<String>,
}

impl TypeDecl {
    /// Creates a concrete type declaration with no capabilities.
    #[must_use]
    pub fn concrete(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Concrete,
            capabilities: CapabilitySet::new(),
            implements: Vec::new(),
        }
    }

    /// Creates an interface declaration with no capabilities.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::concrete(name)
        }
    }

    /// Adds a capability to the declaration.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Records that this type implements (or extends) `parent`.
    #[must_use]
    pub fn implementing(mut self, parent: impl Into<String>) -> Self {
        self.implements.push(parent.into());
        self
    }

    /// Returns the type identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type kind.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns the capabilities declared directly on this type.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Returns the direct parents of this type.
    #[must_use]
    pub fn implements(&self) -> &[String] {
        &self.implements
    }
}

/// Registry of declared types.
///
/// # Example
///
/// ```
/// use ariadne_core::{Capability, TypeCatalog};
///
/// let catalog = TypeCatalog::new()
///     .routable("User")
///     .polymorphic("Imageable")
///     .routable_implementing("Photo", ["Imageable"])
///     .service("Mailer");
///
/// assert!(catalog.has_capability("User", Capability::Routable));
/// assert!(catalog.is_polymorphic("Imageable"));
/// assert!(catalog.is_assignable("Photo", "Imageable"));
/// assert!(!catalog.has_capability("Mailer", Capability::Routable));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: IndexMap<String, TypeDecl>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a type, replacing any previous declaration with the same name.
    pub fn declare(&mut self, decl: TypeDecl) {
        tracing::trace!(type_name = %decl.name, kind = ?decl.kind, "declaring type");
        self.types.insert(decl.name.clone(), decl);
    }

    /// Declares a type and returns the catalog, for chaining.
    #[must_use]
    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.declare(decl);
        self
    }

    /// Declares a concrete routable type.
    #[must_use]
    pub fn routable(self, name: impl Into<String>) -> Self {
        self.with(TypeDecl::concrete(name).with_capability(Capability::Routable))
    }

    /// Declares a concrete routable type that belongs to one or more families.
    #[must_use]
    pub fn routable_implementing<I, S>(self, name: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let decl = parents.into_iter().fold(
            TypeDecl::concrete(name).with_capability(Capability::Routable),
            |decl, parent| decl.implementing(parent),
        );
        self.with(decl)
    }

    /// Declares a polymorphic routable interface (a family marker).
    #[must_use]
    pub fn polymorphic(self, name: impl Into<String>) -> Self {
        self.with(TypeDecl::interface(name).with_capability(Capability::PolymorphicRoutable))
    }

    /// Declares a plain concrete type with no binding capabilities.
    #[must_use]
    pub fn service(self, name: impl Into<String>) -> Self {
        self.with(TypeDecl::concrete(name))
    }

    /// Returns the declaration for a type.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    /// Returns `true` if the type has been declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns `true` if `name` carries `capability`, directly or through a
    /// parent it implements.
    #[must_use]
    pub fn has_capability(&self, name: &str, capability: Capability) -> bool {
        self.ancestry(name)
            .iter()
            .any(|decl| decl.capabilities.contains(capability))
    }

    /// Returns `true` if `name` is one of the capability identifiers in
    /// `filter`, or carries at least one of them.
    #[must_use]
    pub fn satisfies(&self, name: &str, filter: &CapabilitySet) -> bool {
        if filter.iter().any(|c| c.as_str() == name) {
            return true;
        }
        filter.iter().any(|c| self.has_capability(name, c))
    }

    /// Returns `true` if `name` is a polymorphic routable interface.
    #[must_use]
    pub fn is_polymorphic(&self, name: &str) -> bool {
        self.get(name).is_some_and(|decl| {
            decl.kind == TypeKind::Interface
                && self.has_capability(name, Capability::PolymorphicRoutable)
        })
    }

    /// Returns `true` if a value of type `actual` may stand where `declared`
    /// is expected: same type, or `declared` is among its ancestors.
    #[must_use]
    pub fn is_assignable(&self, actual: &str, declared: &str) -> bool {
        if actual == declared {
            return true;
        }
        if let Ok(capability) = declared.parse::<Capability>() {
            return self.has_capability(actual, capability);
        }
        self.ancestry(actual).iter().any(|decl| decl.name == declared)
    }

    /// Returns the declaration of `name` followed by all of its declared
    /// ancestors, breadth first. Cycles and undeclared parents are skipped.
    fn ancestry(&self, name: &str) -> Vec<&TypeDecl> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([name]);
        let mut out = Vec::new();

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(decl) = self.types.get(current) {
                queue.extend(decl.implements.iter().map(String::as_str));
                out.push(decl);
            }
        }

        out
    }
}
