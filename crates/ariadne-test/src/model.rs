//! In-memory routable models.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use ariadne_core::{Routable, RoutableRef};
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::{Call, CallLog};

/// Route key name used by every fixture model.
const ROUTE_KEY_NAME: &str = "id";

/// A stored row: its route key plus named attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: String,
    attributes: IndexMap<String, String>,
}

impl Row {
    /// Creates a row with no attributes.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the route key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns `true` if `value` matches this row on `field`, or on the route
    /// key when no field is given.
    #[must_use]
    pub fn matches(&self, value: &str, field: Option<&str>) -> bool {
        match field {
            None | Some(ROUTE_KEY_NAME) => self.key == value,
            Some(field) => self.attribute(field) == Some(value),
        }
    }
}

/// The rows of one fixture type.
#[derive(Debug, Clone, Default)]
pub struct ModelTable {
    rows: Vec<Row>,
}

impl ModelTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row, replacing any row with the same key.
    pub fn insert(&mut self, row: Row) {
        match self.rows.iter_mut().find(|r| r.key == row.key) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    /// Finds the first row matching `value` on `field`.
    #[must_use]
    pub fn find(&self, value: &str, field: Option<&str>) -> Option<&Row> {
        self.rows.iter().find(|row| row.matches(value, field))
    }

    /// Returns the row with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Row> {
        self.find(key, None)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Owned children of one parent row under one relation.
#[derive(Debug, Clone, Default)]
pub(crate) struct Relation {
    pub(crate) child_type: String,
    pub(crate) keys: Vec<String>,
}

/// Everything the fixture models can query.
#[derive(Debug, Default)]
pub(crate) struct Store {
    pub(crate) tables: IndexMap<String, ModelTable>,
    /// Keyed by (parent type, parent key, relation).
    pub(crate) relations: IndexMap<(String, String, String), Relation>,
}

pub(crate) type SharedStore = Arc<RwLock<Store>>;

/// A routable model backed by a [`ModelTable`].
///
/// A model without a key is a prototype: the unresolved instance the
/// container hands out.
#[derive(Clone)]
pub struct FixtureModel {
    type_name: String,
    key: Option<String>,
    store: SharedStore,
    log: CallLog,
}

impl FixtureModel {
    pub(crate) fn prototype(type_name: impl Into<String>, store: SharedStore, log: CallLog) -> Self {
        Self {
            type_name: type_name.into(),
            key: None,
            store,
            log,
        }
    }

    fn row(&self, type_name: &str, key: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            key: Some(key.to_string()),
            store: Arc::clone(&self.store),
            log: self.log.clone(),
        }
    }

    pub(crate) fn loaded(type_name: &str, key: &str, store: SharedStore, log: CallLog) -> Self {
        Self::prototype(type_name, store, log).row(type_name, key)
    }

    /// Returns the route key, `None` for a prototype.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns `true` for the unresolved instance handed out by the container.
    #[must_use]
    pub fn is_prototype(&self) -> bool {
        self.key.is_none()
    }

    /// Reads an attribute of the stored row.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        let key = self.key.as_deref()?;
        let store = self.store.read();
        store
            .tables
            .get(&self.type_name)?
            .get(key)?
            .attribute(name)
            .map(ToString::to_string)
    }
}

impl fmt::Debug for FixtureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureModel")
            .field("type_name", &self.type_name)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl Routable for FixtureModel {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn route_key_name(&self) -> &str {
        ROUTE_KEY_NAME
    }

    fn route_key(&self) -> String {
        self.key.clone().unwrap_or_default()
    }

    fn resolve_route_binding(&self, value: &str, field: Option<&str>) -> Option<RoutableRef> {
        self.log.record(Call::direct(&self.type_name, value, field));

        let store = self.store.read();
        let row = store.tables.get(&self.type_name)?.find(value, field)?;
        Some(Arc::new(self.row(&self.type_name, row.key())))
    }

    fn resolve_child_route_binding(
        &self,
        parameter: &str,
        value: &str,
        field: Option<&str>,
    ) -> Option<RoutableRef> {
        let parent_key = self.route_key();
        self.log.record(Call::scoped(
            &self.type_name,
            &parent_key,
            parameter,
            value,
            field,
        ));

        let store = self.store.read();
        let relation = store.relations.get(&(
            self.type_name.clone(),
            parent_key,
            parameter.to_string(),
        ))?;
        let row = store
            .tables
            .get(&relation.child_type)?
            .find(value, field)
            .filter(|row| relation.keys.iter().any(|k| k == row.key()))?;

        Some(Arc::new(self.row(&relation.child_type, row.key())))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
