//! Pattern core - the compiled matcher used on the recognize hot path.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::TemplateError;
use crate::template::TemplateNode;

/// Separator characters a `:name` placeholder does not cross by default
pub const DEFAULT_SEPARATORS: &str = "/.?";

/// Default requirement for `*name` placeholders: anything, greedily, possibly empty.
/// Runs in dot-matches-newline mode so a decoded `%0A` is still captured.
pub const SPLAT_REQUIREMENT: &str = "(?s:.*)";

/// Maximum number of captures kept inline before spilling to the heap.
/// Route templates rarely declare more than a handful of placeholders.
pub const MAX_INLINE_CAPTURES: usize = 8;

/// Captured placeholder values in declaration order
///
/// Names are `Arc<str>` shared with the owning [`Pattern`]; a `None` value
/// means the placeholder sat inside a group that did not match.
pub type CaptureVec = SmallVec<[(Arc<str>, Option<String>); MAX_INLINE_CAPTURES]>;

/// A constraint regex attached to one placeholder
///
/// Keeps the caller's source text (embedded into the route matcher) and a
/// whole-value compiled form used to validate values at generation time.
///
/// Requirements use `regex` syntax with Unicode enabled, so `\d` and `\w`
/// accept non-ASCII digits and letters. Write `(?-u:\d)` or `[0-9]` to limit
/// a placeholder to ASCII.
#[derive(Debug, Clone)]
pub struct Requirement {
    source: String,
    whole: Regex,
}

impl Requirement {
    /// Compile a requirement for `name`
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidRequirement`] if `source` is not a valid regex.
    pub fn new(name: &str, source: &str) -> Result<Self, TemplateError> {
        let whole = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            TemplateError::InvalidRequirement {
                name: name.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            whole,
        })
    }

    /// The requirement as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if `value` matches the requirement in full
    #[must_use]
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        self.whole.is_match(value)
    }
}

/// Result of matching a path against a [`Pattern`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// One entry per declared name, in template order
    pub captures: CaptureVec,
    /// Byte length of the matched prefix (the whole path for anchored patterns)
    pub consumed: usize,
}

impl PatternMatch {
    /// Captured value for `name`, if that placeholder participated in the match
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// Compiled, immutable route template
///
/// Holds the parsed tree (reused for generation), the regex matcher, the
/// ordered placeholder names and explicit requirements. Build one with
/// [`Pattern::new`] or [`Pattern::builder`].
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    tree: TemplateNode,
    matcher: Regex,
    names: Vec<Arc<str>>,
    required: Vec<String>,
    requirements: HashMap<String, Requirement>,
    anchored: bool,
}

impl Pattern {
    /// Compile `template` with default separators, anchored to the full path
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the template is malformed.
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        Self::builder(template).build()
    }

    /// Start configuring a pattern for `template`
    #[must_use]
    pub fn builder(template: &str) -> super::PatternBuilder {
        super::PatternBuilder::new(template)
    }

    /// Test `path` against this pattern
    ///
    /// Anchored patterns must consume the whole path; unanchored patterns
    /// only need to match a prefix, whose length is reported in
    /// [`PatternMatch::consumed`]. The prefix must end the path or be
    /// followed by a separator, so unanchored `/foo` accepts `/foo/bar`
    /// but not `/foobar`. Matching is case-sensitive and applies no
    /// normalization.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<PatternMatch> {
        let caps = self.matcher.captures(path)?;
        // Group 1 wraps the template body; an unanchored boundary separator is outside it
        let consumed = caps.get(1).map_or(0, |m| m.end());
        let captures = self
            .names
            .iter()
            .map(|name| {
                let value = caps.name(name).map(|m| m.as_str().to_string());
                (Arc::clone(name), value)
            })
            .collect();
        Some(PatternMatch { captures, consumed })
    }

    /// The template this pattern was compiled from
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed template tree
    #[must_use]
    pub fn tree(&self) -> &TemplateNode {
        &self.tree
    }

    /// Declared placeholder names in template order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }

    /// Whether `name` is a placeholder of this pattern
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.as_ref() == name)
    }

    /// Placeholder names outside every optional group, in template order
    #[must_use]
    pub fn required_names(&self) -> &[String] {
        &self.required
    }

    /// Explicit requirement for `name`, if one was given
    #[must_use]
    pub fn requirement(&self, name: &str) -> Option<&Requirement> {
        self.requirements.get(name)
    }

    /// Whether the matcher must consume the entire path
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// The generated regex source, mostly useful when debugging a table
    #[must_use]
    pub fn matcher_source(&self) -> &str {
        self.matcher.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compile a parsed template into a [`Pattern`]
///
/// `requirements` maps placeholder names to constraint regexes and overrides
/// the defaults: one or more characters outside `separators` for `:name`,
/// [`SPLAT_REQUIREMENT`] for `*name`.
///
/// # Errors
///
/// Returns a [`TemplateError`] if a requirement is invalid or names a
/// placeholder the tree does not declare.
pub fn compile(
    tree: TemplateNode,
    requirements: &HashMap<String, String>,
    separators: &str,
    anchored: bool,
) -> Result<Pattern, TemplateError> {
    let source = tree.to_string();

    let mut compiled = HashMap::with_capacity(requirements.len());
    for (name, requirement) in requirements {
        if !tree.names().contains(&name.as_str()) {
            return Err(TemplateError::UnknownRequirement {
                template: source,
                name: name.clone(),
            });
        }
        compiled.insert(name.clone(), Requirement::new(name, requirement)?);
    }

    let symbol_default = symbol_requirement(separators);
    let mut expr = String::with_capacity(source.len() * 2 + 16);
    expr.push_str("^(");
    write_node(&tree, &compiled, &symbol_default, &mut expr);
    expr.push(')');
    if anchored {
        expr.push('$');
    } else if let Some(class) = separator_class(separators) {
        expr.push_str("(?:$|");
        expr.push_str(&class);
        expr.push(')');
    }

    let matcher = Regex::new(&expr).map_err(|e| TemplateError::InvalidPattern {
        template: source.clone(),
        message: e.to_string(),
    })?;

    let names = tree.names().into_iter().map(Arc::from).collect();
    let required = tree
        .required_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Pattern {
        source,
        tree,
        matcher,
        names,
        required,
        requirements: compiled,
        anchored,
    })
}

fn symbol_requirement(separators: &str) -> String {
    if separators.is_empty() {
        return ".+".to_string();
    }
    let mut class = String::from("[^");
    push_escaped(separators, &mut class);
    class.push_str("]+");
    class
}

fn separator_class(separators: &str) -> Option<String> {
    if separators.is_empty() {
        return None;
    }
    let mut class = String::from("[");
    push_escaped(separators, &mut class);
    class.push(']');
    Some(class)
}

fn push_escaped(separators: &str, out: &mut String) {
    for c in separators.chars() {
        out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
    }
}

fn write_node(
    node: &TemplateNode,
    requirements: &HashMap<String, Requirement>,
    symbol_default: &str,
    out: &mut String,
) {
    match node {
        TemplateNode::Literal(text) => out.push_str(&regex::escape(text)),
        TemplateNode::Symbol(name) => {
            let req = requirements
                .get(name)
                .map_or(symbol_default, Requirement::as_str);
            write_capture(name, req, out);
        }
        TemplateNode::Splat(name) => {
            let req = requirements
                .get(name)
                .map_or(SPLAT_REQUIREMENT, Requirement::as_str);
            write_capture(name, req, out);
        }
        TemplateNode::Group(children) => {
            out.push_str("(?:");
            for child in children {
                write_node(child, requirements, symbol_default, out);
            }
            out.push_str(")?");
        }
        TemplateNode::Sequence(children) => {
            for child in children {
                write_node(child, requirements, symbol_default, out);
            }
        }
    }
}

fn write_capture(name: &str, requirement: &str, out: &mut String) {
    out.push_str("(?P<");
    out.push_str(name);
    out.push('>');
    out.push_str(requirement);
    out.push(')');
}
