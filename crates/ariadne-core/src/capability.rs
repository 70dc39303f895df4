//! Capability tags.
//!
//! Domain types declare what they can do at registration time instead of
//! implementing marker interfaces. The [`TypeCatalog`](crate::TypeCatalog)
//! keeps the lookup table; this module only defines the tags themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A capability a registered type may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// The type can resolve itself from a raw route value.
    Routable,
    /// The type is an interface tagging a family of routable types, selected
    /// through a type tag embedded in the raw value.
    PolymorphicRoutable,
}

impl Capability {
    /// Returns the identifier of this capability.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Routable => "Routable",
            Self::PolymorphicRoutable => "PolymorphicRoutable",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Routable" => Ok(Self::Routable),
            "PolymorphicRoutable" => Ok(Self::PolymorphicRoutable),
            other => Err(UnknownCapability(other.to_string())),
        }
    }
}

/// Error returned when parsing an unknown capability identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability: {0}")]
pub struct UnknownCapability(pub String);

/// A set of capabilities used to filter handler parameters.
///
/// # Example
///
/// ```
/// use ariadne_core::{Capability, CapabilitySet};
///
/// let set = CapabilitySet::bindable();
/// assert!(set.contains(Capability::Routable));
/// assert!(set.contains(Capability::PolymorphicRoutable));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    items: Vec<Capability>,
}

impl CapabilitySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The capabilities implicit binding looks for: `Routable` and
    /// `PolymorphicRoutable`.
    #[must_use]
    pub fn bindable() -> Self {
        [Capability::Routable, Capability::PolymorphicRoutable]
            .into_iter()
            .collect()
    }

    /// Adds a capability, ignoring duplicates.
    pub fn insert(&mut self, capability: Capability) {
        if !self.items.contains(&capability) {
            self.items.push(capability);
        }
    }

    /// Returns `true` if the set contains the capability.
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.items.contains(&capability)
    }

    /// Returns `true` if any capability is shared with `other`.
    #[must_use]
    pub fn intersects(&self, other: &CapabilitySet) -> bool {
        self.items.iter().any(|c| other.contains(*c))
    }

    /// Returns true if there are no capabilities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the capabilities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.items.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = Self::new();
        for capability in iter {
            set.insert(capability);
        }
        set
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        std::iter::once(capability).collect()
    }
}
