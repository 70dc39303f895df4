//! # Ariadne Signature
//!
//! Handler signature introspection for Ariadne.
//!
//! Route handlers are referenced either by a `"Type#method"` string or by a
//! callable carrying its own [`Signature`]. The [`SignatureIntrospector`]
//! resolves either form to the ordered list of [`HandlerParameter`]s, and can
//! keep only the parameters whose declared type is bindable.
//!
//! Signatures are usually generated with the `#[route_signature]` attribute
//! from `ariadne-macros`, which emits a `<fn>_signature()` companion:
//!
//! ```rust,ignore
//! #[route_signature]
//! fn show(user: User, mailer: &Mailer) -> Response { /* ... */ }
//!
//! introspector.register_method("UserController", "show", show_signature());
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne-signature/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod descriptor;
mod introspector;
mod parameter;

pub use descriptor::{HandlerDescriptor, INVOKE_METHOD, METHOD_DELIMITER};
pub use introspector::SignatureIntrospector;
pub use parameter::{HandlerParameter, Signature};
