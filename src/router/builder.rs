use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::info;

use super::core::Router;
use crate::config::RouterConfig;
use crate::error::TemplateError;
use crate::pattern::Pattern;
use crate::request::{AdapterFactory, EnvAdapterFactory};
use crate::route::{Conditions, Params, Predicate, Route, RoutePath};

/// Builder for the route table
///
/// Routes are appended in priority order, then [`build`](Self::build)
/// freezes the table into an immutable [`Router`].
///
/// # Example
///
/// ```rust
/// use waymark::route::{Conditions, Params};
/// use waymark::router::RouterBuilder;
///
/// let mut builder = RouterBuilder::new();
/// builder
///     .add_route("books", Conditions::new("/books(/:action)"), Params::new(), Some("books"))
///     .expect("valid template");
/// let router = builder.build();
/// assert_eq!(router.len(), 1);
/// ```
pub struct RouterBuilder<H> {
    routes: Vec<Arc<Route<H>>>,
    named: HashMap<String, Arc<Route<H>>>,
    config: RouterConfig,
    adapters: Arc<dyn AdapterFactory>,
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for RouterBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("routes_count", &self.routes.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<H> RouterBuilder<H> {
    /// An empty table using [`RouterConfig::default`] and [`EnvAdapterFactory`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            named: HashMap::new(),
            config: RouterConfig::default(),
            adapters: Arc::new(EnvAdapterFactory),
        }
    }

    /// Compile subsequent string templates with `config`
    #[must_use]
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluate predicate conditions on adapters built by `factory`
    #[must_use]
    pub fn request_adapter(mut self, factory: impl AdapterFactory + 'static) -> Self {
        self.adapters = Arc::new(factory);
        self
    }

    /// Register a route at the lowest priority so far
    ///
    /// A string path is compiled with the builder's separators and
    /// anchoring; a prebuilt [`Pattern`] is used as-is. Registering a second
    /// route under an existing name re-points the name at the new route.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the template or a predicate regex is invalid.
    pub fn add_route(
        &mut self,
        handler: H,
        conditions: Conditions,
        defaults: Params,
        name: Option<&str>,
    ) -> Result<Arc<Route<H>>, TemplateError> {
        let (path, verb, predicate_sources) = conditions.into_parts();

        let pattern = match path {
            RoutePath::Pattern(pattern) => pattern,
            RoutePath::Template(template) => Pattern::builder(&template)
                .separators(&self.config.separators)
                .anchored(self.config.anchored)
                .build()?,
        };

        let predicates = predicate_sources
            .iter()
            .map(|(name, regex)| Predicate::new(name, regex))
            .collect::<Result<Vec<_>, _>>()?;

        let route = Arc::new(Route::new(
            pattern,
            handler,
            defaults,
            verb,
            predicates,
            name.map(str::to_string),
        ));

        info!(
            route_pattern = %route.pattern(),
            route_name = ?route.name(),
            verb = ?route.verb(),
            predicates_count = route.predicates().len(),
            priority = self.routes.len(),
            "Route registered"
        );

        self.routes.push(Arc::clone(&route));
        if let Some(name) = name {
            self.named.insert(name.to_string(), Arc::clone(&route));
        }
        Ok(route)
    }

    /// Number of routes registered so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Freeze the table
    #[must_use]
    pub fn build(self) -> Router<H> {
        Router::from_parts(self.routes, self.named, self.adapters)
    }
}
