//! Configured entry point for binding a route.

use ariadne_binding::{BindableRoute, BindingOptions, ImplicitRouteBinding};
use ariadne_config::AriadneConfig;
use ariadne_core::{BindingContainer, BindingError, BindingResult};
use ariadne_telemetry::log_binding_error;

/// Runs implicit binding with configured options and logs failed passes.
///
/// ```rust,ignore
/// let config = ConfigLoader::new().with_env_prefix("ARIADNE").load()?;
/// let binder = Binder::from_config(&config);
///
/// binder.bind(&container, &mut route)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binder {
    resolver: ImplicitRouteBinding,
}

impl Binder {
    /// Creates a binder with the given options.
    pub fn new(options: BindingOptions) -> Self {
        Self {
            resolver: ImplicitRouteBinding::with_options(options),
        }
    }

    /// Creates a binder from the `[binding]` section of a loaded config.
    pub fn from_config(config: &AriadneConfig) -> Self {
        Self::new(config.binding.options())
    }

    /// The options in effect.
    pub fn options(&self) -> &BindingOptions {
        self.resolver.options()
    }

    /// Resolves every bindable parameter of `route` in place.
    ///
    /// Failures are logged once at `warn` before they are returned. The
    /// resolver already reports unmatched values with their parameter and raw
    /// value, so `ModelNotFound` is not logged again here.
    pub fn bind<C, R>(&self, container: &C, route: &mut R) -> BindingResult<()>
    where
        C: BindingContainer + ?Sized,
        R: BindableRoute + ?Sized,
    {
        let result = self.resolver.resolve_for_route(container, route);
        match &result {
            Err(BindingError::ModelNotFound { .. }) | Ok(()) => {}
            Err(error) => {
                log_binding_error!(route.uri(), error);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_config::ConfigLoader;

    #[test]
    fn test_default_options() {
        assert_eq!(*Binder::default().options(), BindingOptions::default());
    }

    #[test]
    fn test_from_config() {
        let config = ConfigLoader::new()
            .with_string("[binding]\npolymorphic_delimiter = \":\"", "toml")
            .unwrap()
            .load()
            .unwrap();
        let binder = Binder::from_config(&config);
        assert_eq!(binder.options().polymorphic_delimiter, ':');
    }
}
