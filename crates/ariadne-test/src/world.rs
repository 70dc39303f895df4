//! A ready-made binding environment.

use std::sync::Arc;

use ariadne_core::{Capability, Container, MorphMap, RoutableRef, TypeCatalog, TypeDecl};

use crate::model::{Relation, SharedStore};
use crate::{Call, CallLog, FixtureModel, Row};

/// Catalog, container and data for binding tests.
///
/// Every builder method keeps the catalog and the container in sync, so
/// `world.container()` always knows every type declared so far.
#[derive(Debug, Clone)]
pub struct FixtureWorld {
    catalog: TypeCatalog,
    morphs: MorphMap,
    store: SharedStore,
    log: CallLog,
    container: Container,
}

impl Default for FixtureWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        let catalog = TypeCatalog::new();
        Self {
            container: Container::new(Arc::new(catalog.clone())),
            catalog,
            morphs: MorphMap::new(),
            store: SharedStore::default(),
            log: CallLog::new(),
        }
    }

    /// Declares a routable fixture type with rows for `keys`.
    #[must_use]
    pub fn model<I, S>(mut self, type_name: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare_model(type_name);
        {
            let mut store = self.store.write();
            let table = store.tables.entry(type_name.to_string()).or_default();
            for key in keys {
                table.insert(Row::new(key));
            }
        }
        self.refresh()
    }

    /// Adds a row with attributes, declaring the type if needed.
    #[must_use]
    pub fn row<I, K, V>(mut self, type_name: &str, key: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.declare_model(type_name);
        let row = attributes
            .into_iter()
            .fold(Row::new(key), |row, (name, value)| row.with_attribute(name, value));
        self.store
            .write()
            .tables
            .entry(type_name.to_string())
            .or_default()
            .insert(row);
        self.refresh()
    }

    /// Declares a polymorphic family and makes `members` implement it.
    #[must_use]
    pub fn polymorphic<I, S>(mut self, interface: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.catalog.declare(
            TypeDecl::interface(interface).with_capability(Capability::PolymorphicRoutable),
        );
        for member in members {
            let member = member.as_ref();
            self.declare_model(member);
            if let Some(decl) = self.catalog.get(member).cloned() {
                self.catalog.declare(decl.implementing(interface));
            }
        }
        self.refresh()
    }

    /// Maps a polymorphic type tag to a concrete type.
    #[must_use]
    pub fn morph(mut self, tag: &str, type_name: &str) -> Self {
        self.morphs.insert(tag, type_name);
        self.refresh()
    }

    /// Declares a non-routable type, such as an injected service.
    #[must_use]
    pub fn service(mut self, type_name: &str) -> Self {
        self.catalog.declare(TypeDecl::concrete(type_name));
        self.refresh()
    }

    /// Makes the `child_type` row `child_key` a child of the given parent row
    /// under `relation`.
    #[must_use]
    pub fn child(
        self,
        parent_type: &str,
        parent_key: &str,
        relation: &str,
        child_type: &str,
        child_key: &str,
    ) -> Self {
        {
            let mut store = self.store.write();
            let entry = store
                .relations
                .entry((
                    parent_type.to_string(),
                    parent_key.to_string(),
                    relation.to_string(),
                ))
                .or_insert_with(|| Relation {
                    child_type: child_type.to_string(),
                    keys: Vec::new(),
                });
            entry.keys.push(child_key.to_string());
        }
        self
    }

    /// Returns a shared handle to the catalog.
    #[must_use]
    pub fn catalog(&self) -> Arc<TypeCatalog> {
        self.container.catalog_handle()
    }

    /// Returns the container.
    #[must_use]
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Returns a loaded model without recording a call.
    #[must_use]
    pub fn instance(&self, type_name: &str, key: &str) -> RoutableRef {
        Arc::new(FixtureModel::loaded(
            type_name,
            key,
            Arc::clone(&self.store),
            self.log.clone(),
        ))
    }

    /// Returns the resolution calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.log.snapshot()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.log.clear();
    }

    fn declare_model(&mut self, type_name: &str) {
        if !self.catalog.contains(type_name) {
            self.catalog.declare(
                TypeDecl::concrete(type_name).with_capability(Capability::Routable),
            );
        }
    }

    fn refresh(mut self) -> Self {
        let mut container =
            Container::new(Arc::new(self.catalog.clone())).with_morph_map(self.morphs.clone());

        let types: Vec<String> = self.store.read().tables.keys().cloned().collect();
        for type_name in types {
            let store = Arc::clone(&self.store);
            let log = self.log.clone();
            let name = type_name.clone();
            container.register(type_name, move || {
                Ok(Arc::new(FixtureModel::prototype(
                    name.clone(),
                    Arc::clone(&store),
                    log.clone(),
                )) as RoutableRef)
            });
        }

        self.container = container;
        self
    }
}
