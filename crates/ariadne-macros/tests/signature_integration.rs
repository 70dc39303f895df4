//! Integration tests for the `#[route_signature]` macro.
//!
//! These tests verify that generated signatures compile and feed the
//! introspector the same way hand-written ones do.

#![allow(dead_code, unused_variables, clippy::needless_pass_by_value)]

use std::sync::Arc;

use ariadne_core::{CapabilitySet, TypeCatalog};
use ariadne_macros::route_signature;
use ariadne_signature::{HandlerDescriptor, HandlerParameter, Signature, SignatureIntrospector};

struct User;
struct Post;
struct Mailer;
trait Imageable {}

#[route_signature]
fn show(user: User, post: Option<Arc<Post>>, page: u32) -> String {
    let _ = (user, post);
    page.to_string()
}

#[route_signature]
async fn notify(mailer: &Mailer, user: Box<User>) {}

#[route_signature(name = "gallery_params")]
fn gallery(imageable: &dyn Imageable, slug: &str) {}

#[route_signature]
fn index() {}

struct PostController;

impl PostController {
    #[route_signature]
    pub fn update(&self, user: User, post: Post) {}
}

fn describe(signature: &Signature) -> Vec<(&str, Option<&str>, bool)> {
    signature
        .iter()
        .map(|p| (p.name(), p.declared_type(), p.is_optional()))
        .collect()
}

#[test]
fn test_generated_signature_matches_declaration() {
    let signature = show_signature();
    assert_eq!(
        describe(&signature),
        vec![
            ("user", Some("User"), false),
            ("post", Some("Post"), true),
            ("page", None, false),
        ]
    );
}

#[test]
fn test_original_function_still_callable() {
    assert_eq!(show(User, None, 3), "3");
}

#[test]
fn test_async_and_wrappers() {
    let signature = notify_signature();
    assert_eq!(
        describe(&signature),
        vec![("mailer", Some("Mailer"), false), ("user", Some("User"), false)]
    );
}

#[test]
fn test_custom_name_and_trait_objects() {
    let signature = gallery_params();
    assert_eq!(
        describe(&signature),
        vec![("imageable", Some("Imageable"), false), ("slug", None, false)]
    );
}

#[test]
fn test_empty_signature() {
    assert!(index_signature().is_empty());
}

#[test]
fn test_method_signature_skips_receiver() {
    let signature = PostController::update_signature();
    let names: Vec<_> = signature.iter().map(HandlerParameter::name).collect();
    assert_eq!(names, vec!["user", "post"]);
}

#[test]
fn test_generated_signature_feeds_introspector() {
    let catalog = Arc::new(
        TypeCatalog::new()
            .routable("User")
            .routable("Post")
            .service("Mailer"),
    );
    let introspector = SignatureIntrospector::new(catalog)
        .with_method("PostController", "update", PostController::update_signature())
        .with_method("NotifyController", "__invoke", notify_signature());

    let update = HandlerDescriptor::parse("PostController#update").unwrap();
    let bindable = introspector
        .extract_parameters(&update, Some(&CapabilitySet::bindable()))
        .unwrap();
    assert_eq!(bindable.len(), 2);

    let notify = HandlerDescriptor::parse("NotifyController").unwrap();
    let bindable = introspector
        .extract_parameters(&notify, Some(&CapabilitySet::bindable()))
        .unwrap();
    let names: Vec<_> = bindable.iter().map(HandlerParameter::name).collect();
    assert_eq!(names, vec!["user"]);
}
