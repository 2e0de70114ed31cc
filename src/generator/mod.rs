//! # Generator Module
//!
//! Renders a concrete path from a route's template tree, the inverse of
//! recognition.
//!
//! ## Resolution
//!
//! Each placeholder's value comes from the caller's `options`, then the
//! `recall` (typically the params of the current request), then the
//! route's defaults. A key present in `options` with a nil value counts as
//! supplied and stops the search. Recall never extends a path beyond the
//! last placeholder the caller supplied.
//!
//! ## Validation
//!
//! Before rendering, every *required* placeholder (one outside all groups)
//! must resolve, and its value must satisfy the placeholder's explicit
//! requirement in full. Placeholders inside groups are not checked here
//! even though the matcher enforces their requirements; `/foo(/:id)` with
//! `id: \d` generates `/foo/aa` from `{id: "aa"}`.
//!
//! ## Optional groups
//!
//! A group whose content references an absent value is dropped entirely.
//! Only the innermost enclosing group is dropped: in
//! `/:controller(/:action(.:format))` a missing `format` drops `.:format`
//! but keeps `/:action`.
//!
//! ## Leftovers
//!
//! The returned leftover params are the `options` that did not end up in the
//! path: keys that are not placeholders (or were supplied as nil), minus
//! keys whose value equals the route's default.

mod render;
mod resolve;
#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use crate::error::RoutingError;
use crate::route::{Params, Route};
use render::{Rendered, Renderer};
use resolve::Resolver;

type Parameterize<'a> = dyn Fn(&str, &str) -> String + 'a;

/// Options for a generation request
///
/// # Example
///
/// ```rust
/// use waymark::generator::GenerateConfig;
///
/// let config = GenerateConfig::new()
///     .parameterize(|_name, value| value.replace(' ', "%20"));
/// ```
#[derive(Default)]
pub struct GenerateConfig<'a> {
    parameterize: Option<Box<Parameterize<'a>>>,
}

impl<'a> GenerateConfig<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { parameterize: None }
    }

    /// Transform every `(name, value)` pair right before it is written into the path
    #[must_use]
    pub fn parameterize<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> String + 'a,
    {
        self.parameterize = Some(Box::new(f));
        self
    }

    pub(crate) fn apply<'v>(&self, name: &str, value: &'v str) -> Cow<'v, str> {
        match &self.parameterize {
            Some(f) => Cow::Owned(f(name, value)),
            None => Cow::Borrowed(value),
        }
    }
}

impl fmt::Debug for GenerateConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateConfig")
            .field("parameterize", &self.parameterize.is_some())
            .finish()
    }
}

/// Render a path for `route`
///
/// Returns the path and the leftover params (see the module docs).
///
/// # Errors
///
/// - [`RoutingError::MissingKeys`] if a required placeholder has no value
/// - [`RoutingError::RequirementMismatch`] if a required value fails its requirement
pub fn generate<H>(
    route: &Route<H>,
    options: &Params,
    recall: &Params,
    config: &GenerateConfig<'_>,
) -> Result<(String, Params), RoutingError> {
    let pattern = route.pattern();
    let resolver = Resolver::new(route, options, recall);

    let missing: Vec<String> = pattern
        .required_names()
        .iter()
        .filter(|name| resolver.resolve(name).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(RoutingError::MissingKeys {
            template: pattern.source().to_string(),
            keys: missing,
        });
    }

    for name in pattern.required_names() {
        let (Some(requirement), Some(value)) = (pattern.requirement(name), resolver.resolve(name))
        else {
            continue;
        };
        if !requirement.is_satisfied_by(value) {
            return Err(RoutingError::RequirementMismatch {
                name: name.clone(),
                value: value.to_string(),
                requirement: requirement.as_str().to_string(),
            });
        }
    }

    let mut path = String::with_capacity(pattern.source().len() + 16);
    if Renderer::new(&resolver, config).render(pattern.tree(), &mut path) == Rendered::Absent {
        // Required names were checked above; an absent root means a
        // top-level placeholder vanished between validation and rendering.
        return Err(RoutingError::MissingKeys {
            template: pattern.source().to_string(),
            keys: Vec::new(),
        });
    }

    let leftover: Params = options
        .iter()
        .filter(|(key, value)| {
            let consumed = value.is_some() && pattern.declares(key);
            let is_default = route.defaults().get(key.as_str()) == Some(*value);
            !consumed && !is_default
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    debug!(
        route_pattern = %pattern,
        path = %path,
        leftover = ?leftover,
        "Path generated"
    );

    Ok((path, leftover))
}
