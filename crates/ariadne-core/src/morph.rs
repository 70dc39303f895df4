//! Polymorphic type-tag registry.
//!
//! Polymorphic parameters receive values such as `photo@42`: the part before
//! the delimiter is a short tag naming a concrete type. The [`MorphMap`] holds
//! the tag table.

use indexmap::IndexMap;

/// Looks up the concrete type registered for a polymorphic tag.
pub trait PolymorphicTypeRegistry {
    /// Returns the concrete type identifier for `tag`, if one is registered.
    fn lookup_concrete_type(&self, tag: &str) -> Option<&str>;
}

/// Tag → concrete type table.
///
/// # Example
///
/// ```
/// use ariadne_core::{MorphMap, PolymorphicTypeRegistry};
///
/// let morphs = MorphMap::new().with("photo", "Photo").with("video", "Video");
///
/// assert_eq!(morphs.lookup_concrete_type("photo"), Some("Photo"));
/// assert_eq!(morphs.alias_for("Video"), Some("video"));
/// assert_eq!(morphs.tagged_value("Photo", "42", '@'), "photo@42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphMap {
    tags: IndexMap<String, String>,
}

impl MorphMap {
    /// Creates an empty morph map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tag` for `type_name`, replacing any previous mapping.
    pub fn insert(&mut self, tag: impl Into<String>, type_name: impl Into<String>) {
        self.tags.insert(tag.into(), type_name.into());
    }

    /// Registers a tag and returns the map, for chaining.
    #[must_use]
    pub fn with(mut self, tag: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.insert(tag, type_name);
        self
    }

    /// Returns the first tag registered for `type_name`.
    #[must_use]
    pub fn alias_for(&self, type_name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(_, ty)| *ty == type_name)
            .map(|(tag, _)| tag.as_str())
    }

    /// Formats a tagged raw value for `type_name`.
    ///
    /// Falls back to the type name itself when no tag is registered, which
    /// mirrors how unregistered tags are resolved.
    #[must_use]
    pub fn tagged_value(&self, type_name: &str, identifier: &str, delimiter: char) -> String {
        let tag = self.alias_for(type_name).unwrap_or(type_name);
        format!("{tag}{delimiter}{identifier}")
    }

    /// Returns the number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl PolymorphicTypeRegistry for MorphMap {
    fn lookup_concrete_type(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MorphMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (tag, type_name) in iter {
            map.insert(tag, type_name);
        }
        map
    }
}
