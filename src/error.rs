//! # Error Types
//!
//! The route template engine distinguishes three failure classes:
//!
//! - [`TemplateError`] - raised while a route table is being built (malformed
//!   template syntax, bad requirement regexes)
//! - [`RoutingError`] - raised by [`Router::generate`](crate::router::Router::generate)
//!   when no path can be produced
//! - [`ConditionError`] - raised by [`Router::recognize`](crate::router::Router::recognize)
//!   when an external request adapter fails while evaluating a predicate
//!
//! A path that matches no route is *not* an error: recognition simply
//! returns `None`.

use std::fmt;

/// Build-time error for a malformed route template or requirement
///
/// Returned while parsing or compiling a template. Positions are byte
/// offsets into the template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `(` was opened and never closed
    UnclosedGroup {
        /// The template being parsed
        template: String,
        /// Offset of the opening parenthesis
        position: usize,
    },
    /// A `)` appeared with no matching `(`
    UnexpectedGroupClose {
        /// The template being parsed
        template: String,
        /// Offset of the closing parenthesis
        position: usize,
    },
    /// A `:` or `*` was not followed by a valid identifier
    InvalidName {
        /// The template being parsed
        template: String,
        /// Offset of the sigil
        position: usize,
    },
    /// The same placeholder name was declared twice
    DuplicateName {
        /// The template being parsed
        template: String,
        /// The repeated name
        name: String,
    },
    /// A requirement could not be compiled as a regular expression
    InvalidRequirement {
        /// The constrained placeholder name (or predicate name)
        name: String,
        /// The regex compiler's message
        message: String,
    },
    /// Requirements compiled on their own but the combined route matcher did not
    InvalidPattern {
        /// The template being compiled
        template: String,
        /// The regex compiler's message
        message: String,
    },
    /// A requirement names a placeholder the template does not declare
    UnknownRequirement {
        /// The template being compiled
        template: String,
        /// The undeclared name
        name: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnclosedGroup { template, position } => {
                write!(
                    f,
                    "template error: unclosed group opened at offset {} in '{}'",
                    position, template
                )
            }
            TemplateError::UnexpectedGroupClose { template, position } => {
                write!(
                    f,
                    "template error: unexpected ')' at offset {} in '{}'",
                    position, template
                )
            }
            TemplateError::InvalidName { template, position } => {
                write!(
                    f,
                    "template error: placeholder at offset {} in '{}' is missing a valid name",
                    position, template
                )
            }
            TemplateError::DuplicateName { template, name } => {
                write!(
                    f,
                    "template error: placeholder '{}' declared more than once in '{}'",
                    name, template
                )
            }
            TemplateError::InvalidRequirement { name, message } => {
                write!(
                    f,
                    "template error: requirement for '{}' is not a valid regex: {}",
                    name, message
                )
            }
            TemplateError::InvalidPattern { template, message } => {
                write!(
                    f,
                    "template error: matcher for '{}' failed to compile: {}",
                    template, message
                )
            }
            TemplateError::UnknownRequirement { template, name } => {
                write!(
                    f,
                    "template error: requirement given for '{}' but '{}' declares no such placeholder",
                    name, template
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Runtime error raised while generating a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// A route name was requested that was never registered
    UnknownRoute {
        /// The requested name
        name: String,
    },
    /// Generation was requested against an empty route table
    NoRoutes,
    /// Required placeholders could not be resolved from options, recall or defaults
    MissingKeys {
        /// The route's source template
        template: String,
        /// Every unresolved required name, in template order
        keys: Vec<String>,
    },
    /// A resolved value does not satisfy its placeholder's requirement
    RequirementMismatch {
        /// The placeholder name
        name: String,
        /// The offending value
        value: String,
        /// The requirement regex source
        requirement: String,
    },
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::UnknownRoute { name } => {
                write!(f, "routing error: no route named '{}'", name)
            }
            RoutingError::NoRoutes => write!(f, "routing error: route table is empty"),
            RoutingError::MissingKeys { template, keys } => {
                write!(
                    f,
                    "routing error: missing required keys [{}] for '{}'",
                    keys.join(", "),
                    template
                )
            }
            RoutingError::RequirementMismatch {
                name,
                value,
                requirement,
            } => {
                write!(
                    f,
                    "routing error: value '{}' for '{}' does not match /{}/",
                    value, name, requirement
                )
            }
        }
    }
}

impl std::error::Error for RoutingError {}

/// A request adapter failed while evaluating a predicate condition
///
/// Adapter failures are never swallowed by recognition; they surface here
/// with the name of the predicate that was being evaluated.
#[derive(Debug)]
pub struct ConditionError {
    /// The predicate condition being evaluated
    pub condition: String,
    /// The adapter's error
    pub source: anyhow::Error,
}

impl ConditionError {
    pub fn new(condition: impl Into<String>, source: anyhow::Error) -> Self {
        Self {
            condition: condition.into(),
            source,
        }
    }
}

impl fmt::Display for ConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "condition error: evaluating '{}' failed: {}",
            self.condition, self.source
        )
    }
}

impl std::error::Error for ConditionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}
