//! # Ariadne Core
//!
//! Core types and traits for Ariadne implicit route binding.
//!
//! This crate provides the foundational types used throughout Ariadne:
//!
//! - [`Routable`] - Domain objects that resolve themselves from raw route values
//! - [`ParameterValue`] - Raw or resolved route parameter values
//! - [`Capability`] / [`CapabilitySet`] - Capability tags replacing marker interfaces
//! - [`TypeCatalog`] - Declared types, their capabilities and families
//! - [`Container`] - Factory registry producing prototype instances
//! - [`MorphMap`] - Polymorphic type-tag registry
//! - [`BindingError`] - Standard error type

#![doc(html_root_url = "https://docs.rs/ariadne-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod capability;
mod catalog;
mod container;
mod error;
mod morph;
mod routable;

pub use capability::{Capability, CapabilitySet, UnknownCapability};
pub use catalog::{TypeCatalog, TypeDecl, TypeKind};
pub use container::{BindingContainer, Container, ResolutionContainer};
pub use error::{BindingError, BindingResult, ErrorCategory, ErrorDetail, ErrorEnvelope};
pub use morph::{MorphMap, PolymorphicTypeRegistry};
pub use routable::{ParameterValue, Routable, RoutableRef};
