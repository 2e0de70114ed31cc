use std::collections::HashMap;

use super::core::{compile, DEFAULT_SEPARATORS};
use super::Pattern;
use crate::error::TemplateError;
use crate::template::parse;

/// Builder for creating a [`Pattern`] with a fluent API
///
/// # Example
///
/// ```rust
/// use waymark::pattern::Pattern;
///
/// let pattern = Pattern::builder("/foo(/:id)")
///     .requirement("id", r"\d+")
///     .separators("/.?")
///     .anchored(true)
///     .build()
///     .expect("valid template");
///
/// assert!(pattern.match_path("/foo/10").is_some());
/// assert!(pattern.match_path("/foo/aa").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    template: String,
    requirements: HashMap<String, String>,
    separators: String,
    anchored: bool,
}

impl PatternBuilder {
    /// Create a builder with default separators (`/`, `.`, `?`), anchored
    #[must_use]
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            requirements: HashMap::new(),
            separators: DEFAULT_SEPARATORS.to_string(),
            anchored: true,
        }
    }

    /// Constrain placeholder `name` with the regex `requirement`
    ///
    /// A later call for the same name replaces the earlier one.
    #[must_use]
    pub fn requirement(mut self, name: &str, requirement: &str) -> Self {
        self.requirements
            .insert(name.to_string(), requirement.to_string());
        self
    }

    /// Constrain several placeholders at once
    #[must_use]
    pub fn requirements<I, K, V>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.requirements
            .extend(requirements.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Characters a `:name` placeholder may not contain unless constrained otherwise
    #[must_use]
    pub fn separators(mut self, separators: &str) -> Self {
        self.separators = separators.to_string();
        self
    }

    /// Require a full-path match (`true`) or allow a prefix match (`false`)
    #[must_use]
    pub fn anchored(mut self, anchored: bool) -> Self {
        self.anchored = anchored;
        self
    }

    /// Parse and compile the template
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for malformed templates or requirements.
    pub fn build(self) -> Result<Pattern, TemplateError> {
        let tree = parse(&self.template)?;
        compile(tree, &self.requirements, &self.separators, self.anchored)
    }
}
