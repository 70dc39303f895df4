//! # Ariadne Binding
//!
//! Implicit route-parameter binding.
//!
//! Given a matched [`Route`] whose handler declares typed parameters,
//! [`ImplicitRouteBinding`] turns the raw values captured from the URL into
//! resolved models, in place:
//!
//! - `postId` in the handler matches a `{post_id}` placeholder
//! - values that already hold a model are left untouched
//! - polymorphic families read a `"<tag>@<identifier>"` value and resolve the
//!   tagged type
//! - `{post:slug}` placeholders nested under a resolved parent are looked up
//!   through the parent
//! - the first value without a match fails the pass with
//!   [`BindingError::ModelNotFound`](ariadne_core::BindingError::ModelNotFound)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut route = Route::action("/users/{user}/posts/{post:slug}", "PostController#show", introspector)?;
//! route.bind(captured);
//!
//! ImplicitRouteBinding::new().resolve_for_route(&container, &mut route)?;
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne-binding/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod params;
mod resolver;
mod route;

pub use params::RouteParameters;
pub use resolver::{
    resolve_for_route, BindingOptions, ImplicitRouteBinding, Strategy,
    DEFAULT_POLYMORPHIC_DELIMITER,
};
pub use route::{BindableRoute, Route, RouteSegment};
