use http::Method;
use regex::Regex;

use crate::error::TemplateError;
use crate::pattern::Pattern;

/// The path a route is registered with: a raw template or a prebuilt pattern
///
/// Templates are compiled with the router builder's configured separators
/// and anchoring; a [`Pattern`] is used as-is.
#[derive(Debug, Clone)]
pub enum RoutePath {
    Template(String),
    Pattern(Pattern),
}

impl From<&str> for RoutePath {
    fn from(template: &str) -> Self {
        RoutePath::Template(template.to_string())
    }
}

impl From<String> for RoutePath {
    fn from(template: String) -> Self {
        RoutePath::Template(template)
    }
}

impl From<Pattern> for RoutePath {
    fn from(pattern: Pattern) -> Self {
        RoutePath::Pattern(pattern)
    }
}

/// A named predicate condition: `name` is evaluated on the request adapter
/// and the result tested against `regex`
#[derive(Debug, Clone)]
pub struct Predicate {
    name: String,
    regex: Regex,
}

impl Predicate {
    /// Compile a predicate condition
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidRequirement`] if `regex` does not compile.
    pub fn new(name: &str, regex: &str) -> Result<Self, TemplateError> {
        let regex = Regex::new(regex).map_err(|e| TemplateError::InvalidRequirement {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name: name.to_string(),
            regex,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether an evaluated predicate value satisfies this condition
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Registration conditions: the required path plus optional verb and predicates
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use waymark::route::Conditions;
///
/// let conditions = Conditions::new("/books(/:action(.:format))")
///     .verb(Method::POST)
///     .predicate("subdomain", "^api$");
/// assert_eq!(conditions.verb_condition(), Some(&Method::POST));
/// ```
#[derive(Debug, Clone)]
pub struct Conditions {
    path: RoutePath,
    verb: Option<Method>,
    predicates: Vec<(String, String)>,
}

impl Conditions {
    #[must_use]
    pub fn new(path: impl Into<RoutePath>) -> Self {
        Self {
            path: path.into(),
            verb: None,
            predicates: Vec::new(),
        }
    }

    /// Only qualify requests with exactly this method
    #[must_use]
    pub fn verb(mut self, verb: Method) -> Self {
        self.verb = Some(verb);
        self
    }

    /// Only qualify requests whose adapter evaluates `name` to something matching `regex`
    ///
    /// The regex is compiled when the route is registered.
    #[must_use]
    pub fn predicate(mut self, name: &str, regex: &str) -> Self {
        self.predicates.push((name.to_string(), regex.to_string()));
        self
    }

    #[must_use]
    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    #[must_use]
    pub fn verb_condition(&self) -> Option<&Method> {
        self.verb.as_ref()
    }

    pub(crate) fn into_parts(self) -> (RoutePath, Option<Method>, Vec<(String, String)>) {
        (self.path, self.verb, self.predicates)
    }
}
