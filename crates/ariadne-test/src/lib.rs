//! # Ariadne Test
//!
//! In-memory fixtures for testing route binding without a database.
//!
//! ## Key Features
//!
//! - **Model Tables**: Rows keyed by route key, with optional attributes for
//!   binding-field lookups
//! - **Scoped Children**: Parent rows can own child rows per relation
//! - **Call Recording**: Every resolution call is recorded so tests can
//!   assert which strategy ran with which arguments
//! - **Ready Container**: A [`Container`](ariadne_core::Container) with a
//!   factory for every fixture type
//!
//! ## Example
//!
//! ```
//! use ariadne_core::ResolutionContainer;
//! use ariadne_test::{Call, FixtureWorld};
//!
//! let world = FixtureWorld::new()
//!     .model("User", ["5"])
//!     .row("Post", "10", [("slug", "hello-world")])
//!     .child("User", "5", "post", "Post", "10");
//!
//! let prototype = world.container().make("User").unwrap();
//! let user = prototype.resolve_route_binding("5", None).unwrap();
//! let post = user
//!     .resolve_child_route_binding("post", "hello-world", Some("slug"))
//!     .unwrap();
//!
//! assert_eq!(post.route_key(), "10");
//! assert_eq!(
//!     world.calls(),
//!     vec![
//!         Call::direct("User", "5", None),
//!         Call::scoped("User", "5", "post", "hello-world", Some("slug")),
//!     ]
//! );
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod call;
mod model;
mod world;

pub use call::{Call, CallLog};
pub use model::{FixtureModel, ModelTable, Row};
pub use world::FixtureWorld;
