//! # Ariadne
//!
//! **Implicit route-parameter binding**
//!
//! Ariadne turns the raw strings captured from a URL into the model objects a
//! route handler declares:
//!
//! - **Signature Introspection** – read a handler's parameters from a
//!   `"Type#method"` descriptor or a `#[route_signature]` companion
//! - **Direct and Scoped Resolution** – resolve through a prototype instance,
//!   or through the preceding parent model when a binding field is set
//! - **Polymorphic Values** – `"photo@42"` picks the concrete type from a
//!   type tag
//! - **Structured Errors** – not-found, malformed and reflection failures map
//!   to 404, 400 and 500
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ariadne::prelude::*;
//!
//! #[route_signature]
//! fn show(user: User, post: Post) -> Response { /* ... */ }
//!
//! let catalog = Arc::new(TypeCatalog::new().routable("User").routable("Post"));
//! let introspector = Arc::new(
//!     SignatureIntrospector::new(Arc::clone(&catalog))
//!         .with_method("PostController", "show", show_signature()),
//! );
//!
//! let mut route = Route::action(
//!     "/users/{user}/posts/{post:slug}",
//!     "PostController#show",
//!     introspector,
//! )?;
//! route.bind([("user", "5"), ("post", "hello-world")]);
//!
//! Binder::default().bind(&container, &mut route)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! captured values → Route → SignatureIntrospector → ImplicitRouteBinding
//!                                                        ↓
//! handler arguments ← RouteParameters ← Routable::resolve_*_route_binding
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;

pub use binder::Binder;

// Re-export core types
pub use ariadne_core as core;

// Re-export signature introspection
pub use ariadne_signature as signature;

// Re-export the resolver and route types
pub use ariadne_binding as binding;

// Re-export the signature attribute macro
pub use ariadne_macros::route_signature;

// Re-export logging
pub use ariadne_telemetry as telemetry;

// Re-export configuration
pub use ariadne_config as config;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use ariadne::prelude::*;
/// ```
pub mod prelude {
    pub use ariadne_core::{
        BindingContainer, BindingError, BindingResult, CapabilitySet, Container, MorphMap,
        ParameterValue, Routable, RoutableRef, TypeCatalog,
    };

    pub use ariadne_signature::{HandlerDescriptor, HandlerParameter, Signature, SignatureIntrospector};

    pub use ariadne_binding::{
        resolve_for_route, BindableRoute, BindingOptions, ImplicitRouteBinding, Route,
        RouteParameters,
    };

    pub use ariadne_macros::route_signature;

    pub use ariadne_config::{AriadneConfig, ConfigLoader};

    pub use crate::Binder;
}
