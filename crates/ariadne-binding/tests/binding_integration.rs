//! End-to-end tests for implicit route binding.
//!
//! These tests drive the resolver the way a dispatcher would: signatures come
//! from `#[route_signature]`, models from a hand-written repository, and one
//! test uses a dispatcher-owned route type instead of [`Route`].

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use ariadne_binding::{
    resolve_for_route, BindableRoute, ImplicitRouteBinding, Route, RouteParameters,
};
use ariadne_core::{
    BindingError, BindingResult, CapabilitySet, Container, ParameterValue, Routable, RoutableRef,
    TypeCatalog,
};
use ariadne_macros::route_signature;
use ariadne_signature::{HandlerDescriptor, HandlerParameter, SignatureIntrospector};
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
struct User {
    id: u64,
    email: String,
}

impl User {
    fn table() -> Vec<User> {
        vec![
            User {
                id: 7,
                email: "ada@example.com".into(),
            },
            User {
                id: 8,
                email: "grace@example.com".into(),
            },
        ]
    }
}

impl Routable for User {
    fn type_name(&self) -> &str {
        "User"
    }

    fn route_key(&self) -> String {
        self.id.to_string()
    }

    fn resolve_route_binding(&self, value: &str, field: Option<&str>) -> Option<RoutableRef> {
        Self::table()
            .into_iter()
            .find(|user| match field {
                Some("email") => user.email == value,
                _ => user.id.to_string() == value,
            })
            .map(|user| Arc::new(user) as RoutableRef)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
#[allow(dead_code)]
struct Mailer;

#[route_signature]
#[allow(dead_code, unused_variables)]
fn show(user: User, mailer: &Mailer) {}

fn world() -> (Container, Arc<SignatureIntrospector>) {
    let catalog = Arc::new(TypeCatalog::new().routable("User").service("Mailer"));
    let mut container = Container::new(Arc::clone(&catalog));
    container.register_default::<User>("User");

    let introspector = Arc::new(
        SignatureIntrospector::new(catalog).with_method("UserController", "show", show_signature()),
    );
    (container, introspector)
}

#[test]
fn test_show_user_end_to_end() {
    let (container, introspector) = world();
    let mut route = Route::action("/users/{user}", "UserController#show", introspector).unwrap();
    route.bind([("user", "7")]);

    resolve_for_route(&container, &mut route).unwrap();

    let user = route
        .parameter("user")
        .and_then(|v| v.downcast_ref::<User>())
        .unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(route.parameters().len(), 1);
}

#[test]
fn test_binding_field_from_pattern() {
    let (container, introspector) = world();
    let mut route =
        Route::action("/users/{user:email}", "UserController#show", introspector).unwrap();
    route.bind([("user", "grace@example.com")]);

    route.resolve_bindings(&container).unwrap();

    let user = route
        .parameter("user")
        .and_then(|v| v.downcast_ref::<User>())
        .unwrap();
    assert_eq!(user.id, 8);
}

#[test]
fn test_not_found_maps_to_404() {
    let (container, introspector) = world();
    let mut route = Route::action("/users/{user}", "UserController#show", introspector).unwrap();
    route.bind([("user", "99")]);

    let err = resolve_for_route(&container, &mut route).unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_envelope().error.code, "MODEL_NOT_FOUND");
    assert_eq!(
        route.parameter("user").and_then(ParameterValue::as_raw),
        Some("99")
    );
}

/// A dispatcher-owned route: fixed handler parameters, no URI parsing.
struct DispatcherRoute {
    parameters: RouteParameters,
    handler: Vec<HandlerParameter>,
    fields: IndexMap<String, String>,
    parents: HashMap<String, String>,
}

impl BindableRoute for DispatcherRoute {
    fn uri(&self) -> &str {
        "dispatcher"
    }

    fn parameters(&self) -> &RouteParameters {
        &self.parameters
    }

    fn signature_parameters(
        &self,
        filter: Option<&CapabilitySet>,
    ) -> BindingResult<Vec<HandlerParameter>> {
        let catalog = TypeCatalog::new().routable("User");
        Ok(self
            .handler
            .iter()
            .filter(|p| {
                filter.map_or(true, |f| {
                    p.declared_type().is_some_and(|ty| catalog.satisfies(ty, f))
                })
            })
            .cloned()
            .collect())
    }

    fn parent_of_parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parents.get(name).and_then(|p| self.parameters.get(p))
    }

    fn binding_fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    fn set_parameter(&mut self, name: &str, value: ParameterValue) {
        self.parameters.set(name, value);
    }
}

#[test]
fn test_custom_route_type() {
    let (container, _) = world();
    let mut route = DispatcherRoute {
        parameters: [("owner_id", "8")].into_iter().collect(),
        handler: vec![
            HandlerParameter::typed("ownerId", "User"),
            HandlerParameter::untyped("page"),
        ],
        fields: IndexMap::new(),
        parents: HashMap::new(),
    };

    ImplicitRouteBinding::new()
        .resolve_for_route(&container, &mut route)
        .unwrap();

    let owner = route
        .parameters()
        .get("owner_id")
        .and_then(|v| v.downcast_ref::<User>())
        .unwrap();
    assert_eq!(owner.email, "grace@example.com");
}

#[test]
fn test_handler_descriptor_errors_surface() {
    let (container, introspector) = world();
    let err = Route::action("/users/{user}", "#show", Arc::clone(&introspector)).unwrap_err();
    assert!(matches!(err, BindingError::Reflection { .. }));

    let mut route = Route::new(
        "/users/{user}",
        HandlerDescriptor::method("UserController", "destroy"),
        introspector,
    )
    .unwrap();
    route.bind([("user", "7")]);
    let err = resolve_for_route(&container, &mut route).unwrap_err();
    assert!(matches!(err, BindingError::Reflection { .. }));
}
