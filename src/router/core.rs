#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use http::header::{HeaderName, HeaderValue};
use http::{Response, StatusCode};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::builder::RouterBuilder;
use crate::error::{ConditionError, RoutingError};
use crate::generator::{generate, GenerateConfig};
use crate::pattern::PatternMatch;
use crate::request::{AdapterFactory, RequestEnv};
use crate::route::{Params, Route};

/// Header telling an enclosing router chain to try the next router
pub const CASCADE_HEADER: &str = "x-cascade";

/// Recognitions slower than this are logged at `warn`
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// The outcome of a successful recognition
#[derive(Debug)]
pub struct Recognized<'r, H> {
    /// The selected route
    pub route: &'r Arc<Route<H>>,
    /// The route's handler
    pub handler: &'r H,
    /// Route defaults overlaid with the captured values
    pub params: Params,
}

/// What [`Router::call`] hands back to the HTTP layer
#[derive(Debug)]
pub enum Dispatch<'r, H> {
    /// A route matched and qualified
    Matched(Recognized<'r, H>),
    /// Nothing matched: `404` with `X-Cascade: pass` and an empty body
    Pass(Response<Vec<u8>>),
}

/// Immutable route table with recognition and generation
///
/// Routes are held in registration order, which is their recognition
/// priority. A `Router` is never mutated after [`RouterBuilder::build`] and
/// can be shared across worker threads.
pub struct Router<H> {
    routes: Vec<Arc<Route<H>>>,
    named: HashMap<String, Arc<Route<H>>>,
    adapters: Arc<dyn AdapterFactory>,
}

impl<H> Clone for Router<H> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            named: self.named.clone(),
            adapters: Arc::clone(&self.adapters),
        }
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<&str> = self.routes.iter().map(|r| r.pattern().source()).collect();
        f.debug_struct("Router")
            .field("routes", &patterns)
            .field("named", &self.named.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<H> Router<H> {
    /// Start building a route table
    #[must_use]
    pub fn builder() -> RouterBuilder<H> {
        RouterBuilder::new()
    }

    pub(crate) fn from_parts(
        routes: Vec<Arc<Route<H>>>,
        named: HashMap<String, Arc<Route<H>>>,
        adapters: Arc<dyn AdapterFactory>,
    ) -> Self {
        let routes_summary: Vec<&str> = routes
            .iter()
            .take(10)
            .map(|r| r.pattern().source())
            .collect();
        info!(
            routes_count = routes.len(),
            named_count = named.len(),
            routes_summary = ?routes_summary,
            "Routing table frozen"
        );
        Self {
            routes,
            named,
            adapters,
        }
    }

    /// Routes in priority order
    #[must_use]
    pub fn routes(&self) -> &[Arc<Route<H>>] {
        &self.routes
    }

    /// The route registered last under `name`
    #[must_use]
    pub fn route(&self, name: &str) -> Option<&Arc<Route<H>>> {
        self.named.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route, in registration order, whose pattern matches
    /// `env.path_info` and whose conditions hold
    ///
    /// When the selected pattern is unanchored and matched only a prefix,
    /// the prefix moves from `path_info` onto `script_name`. Returns
    /// `Ok(None)` if nothing matched; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ConditionError`] if the request adapter fails while
    /// evaluating a predicate.
    pub fn recognize(
        &self,
        env: &mut RequestEnv,
    ) -> Result<Option<Recognized<'_, H>>, ConditionError> {
        debug!(
            method = %env.request_method,
            path = %env.path_info,
            routes_count = self.routes.len(),
            "Route match attempt"
        );
        let match_start = Instant::now();

        let Some((route, matched)) = self.select(env)? else {
            warn!(
                method = %env.request_method,
                path = %env.path_info,
                duration_us = match_start.elapsed().as_micros(),
                "No route matched"
            );
            return Ok(None);
        };

        if !route.pattern().is_anchored() && matched.consumed < env.path_info.len() {
            env.shift_prefix(matched.consumed);
        }

        let mut params = route.defaults().clone();
        for (name, value) in matched.captures {
            if let Some(value) = value {
                params.insert(name.to_string(), Some(value));
            }
        }

        let match_duration = match_start.elapsed();
        if match_duration > SLOW_MATCH {
            warn!(
                method = %env.request_method,
                path = %env.path_info,
                route_pattern = %route.pattern(),
                route_name = ?route.name(),
                params = ?params,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            info!(
                method = %env.request_method,
                path = %env.path_info,
                script_name = %env.script_name,
                route_pattern = %route.pattern(),
                route_name = ?route.name(),
                params = ?params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        Ok(Some(Recognized {
            route,
            handler: route.handler(),
            params,
        }))
    }

    /// The first matching, qualifying route. At most one adapter is built
    /// and it is shared by every route tried.
    fn select(
        &self,
        env: &RequestEnv,
    ) -> Result<Option<(&Arc<Route<H>>, PatternMatch)>, ConditionError> {
        let mut adapter = None;
        for route in &self.routes {
            let Some(matched) = route.pattern().match_path(&env.path_info) else {
                continue;
            };
            if route.qualifies_with(env, self.adapters.as_ref(), &mut adapter)? {
                return Ok(Some((route, matched)));
            }
            debug!(
                route_pattern = %route.pattern(),
                "Route matched path but conditions failed"
            );
        }
        Ok(None)
    }

    /// [`recognize`](Self::recognize), with the pass-through response when
    /// nothing matches
    ///
    /// # Errors
    ///
    /// Returns a [`ConditionError`] if predicate evaluation fails.
    pub fn call(&self, env: &mut RequestEnv) -> Result<Dispatch<'_, H>, ConditionError> {
        Ok(match self.recognize(env)? {
            Some(recognized) => Dispatch::Matched(recognized),
            None => Dispatch::Pass(not_found()),
        })
    }

    /// Generate a path using the named route, or the best-scoring route
    ///
    /// See [`generate_with`](Self::generate_with).
    ///
    /// # Errors
    ///
    /// See [`generate_with`](Self::generate_with).
    pub fn generate(
        &self,
        name: Option<&str>,
        options: &Params,
        recall: &Params,
    ) -> Result<(String, Params), RoutingError> {
        self.generate_with(name, options, recall, &GenerateConfig::default())
    }

    /// Generate a path, passing every inserted value through `config`
    ///
    /// With a `name` the named route is used. Without one, the route that
    /// declares the most names among the keys of `options` and `recall`
    /// wins; on a tie the later registration wins.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::UnknownRoute`] if `name` is not registered
    /// - [`RoutingError::NoRoutes`] if the table is empty
    /// - [`RoutingError::MissingKeys`] / [`RoutingError::RequirementMismatch`]
    ///   if the chosen route cannot be rendered
    pub fn generate_with(
        &self,
        name: Option<&str>,
        options: &Params,
        recall: &Params,
        config: &GenerateConfig<'_>,
    ) -> Result<(String, Params), RoutingError> {
        debug!(
            route_name = ?name,
            options = ?options,
            recall = ?recall,
            "Path generation requested"
        );

        let route = match name {
            Some(name) => self
                .named
                .get(name)
                .ok_or_else(|| RoutingError::UnknownRoute {
                    name: name.to_string(),
                })?,
            None => self.best_route(options, recall)?,
        };

        generate(route, options, recall, config).inspect_err(|e| {
            warn!(
                route_pattern = %route.pattern(),
                error = %e,
                "Path generation failed"
            );
        })
    }

    fn best_route(&self, options: &Params, recall: &Params) -> Result<&Arc<Route<H>>, RoutingError> {
        let available: HashSet<&str> = options
            .keys()
            .chain(recall.keys())
            .map(String::as_str)
            .collect();

        let mut best: Option<(&Arc<Route<H>>, usize)> = None;
        for route in &self.routes {
            let score = route.score(&available);
            if best.map_or(true, |(_, top)| score >= top) {
                best = Some((route, score));
            }
        }
        best.map(|(route, _)| route).ok_or(RoutingError::NoRoutes)
    }
}

/// The pass-through response for an unmatched request
#[must_use]
pub fn not_found() -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response.headers_mut().insert(
        HeaderName::from_static(CASCADE_HEADER),
        HeaderValue::from_static("pass"),
    );
    response
}
