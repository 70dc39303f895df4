//! Procedural macros for Ariadne.
//!
//! Ariadne binds route parameters by looking at the declared types of a
//! handler's parameters. Rust has no runtime reflection, so the
//! `#[route_signature]` attribute records that information at compile time.
//!
//! # Example
//!
//! ```rust,ignore
//! use ariadne::prelude::*;
//!
//! #[route_signature]
//! fn show(user: &User, comment: Option<Arc<Comment>>, page: u32) -> Response {
//!     // ...
//! }
//!
//! // Generated alongside `show`:
//! // fn show_signature() -> ariadne_signature::Signature
//! introspector.register_method("CommentController", "show", show_signature());
//! ```
//!
//! # Type Classification
//!
//! - `Option<T>` marks the parameter optional and classifies `T`
//! - `&T`, `Arc<T>`, `Box<T>` and `Rc<T>` classify as `T`
//! - `dyn Trait` and `impl Trait` classify as `Trait`
//! - integers, floats, `bool`, `char`, `str` and `String` have no declared type
//! - any other path classifies as its last segment

mod parse;
mod signature;

use proc_macro::TokenStream;

/// Records the parameter list of a route handler.
///
/// Emits the function unchanged plus a companion `<name>_signature()` that
/// returns its [`Signature`](../ariadne_signature/struct.Signature.html).
/// Receivers are skipped, so the attribute also works on methods inside an
/// `impl` block, where the companion becomes an associated function.
///
/// # Attributes
///
/// - `name`: Overrides the companion function name
/// - `signature_crate`: Path of the signature crate in generated code
///   (defaults to `::ariadne_signature`; use `"::ariadne::signature"` when
///   depending on the facade only)
///
/// # Example
///
/// ```rust,ignore
/// impl PostController {
///     #[route_signature]
///     pub fn show(&self, user: User, post: Post) -> Response { /* ... */ }
/// }
///
/// let signature = PostController::show_signature();
/// assert_eq!(signature.len(), 2);
/// ```
#[proc_macro_attribute]
pub fn route_signature(attr: TokenStream, item: TokenStream) -> TokenStream {
    signature::expand_route_signature(attr.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
