use std::fmt;

/// Structural representation of a parsed path template
///
/// The root of every parse is a [`TemplateNode::Sequence`]. A
/// [`TemplateNode::Group`] marks an optional subsequence and may nest.
///
/// ```rust
/// use waymark::template::{parse, TemplateNode};
///
/// let tree = parse("/foo(/:id)").unwrap();
/// assert_eq!(
///     tree,
///     TemplateNode::Sequence(vec![
///         TemplateNode::Literal("/foo".into()),
///         TemplateNode::Group(vec![
///             TemplateNode::Literal("/".into()),
///             TemplateNode::Symbol("id".into()),
///         ]),
///     ])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    /// Text matched and rendered verbatim
    Literal(String),
    /// `:name` - a named placeholder bounded by separators
    Symbol(String),
    /// `*name` - a catch-all placeholder that spans separators
    Splat(String),
    /// `(...)` - an optional subsequence
    Group(Vec<TemplateNode>),
    /// An ordered run of nodes
    Sequence(Vec<TemplateNode>),
}

impl TemplateNode {
    /// Every placeholder name in template order, grouped or not
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names, true);
        names
    }

    /// Placeholder names that sit outside every group
    ///
    /// These are the names a path cannot be generated without.
    #[must_use]
    pub fn required_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names, false);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>, descend_groups: bool) {
        match self {
            TemplateNode::Literal(_) => {}
            TemplateNode::Symbol(name) | TemplateNode::Splat(name) => out.push(name),
            TemplateNode::Group(children) => {
                if descend_groups {
                    for child in children {
                        child.collect_names(out, descend_groups);
                    }
                }
            }
            TemplateNode::Sequence(children) => {
                for child in children {
                    child.collect_names(out, descend_groups);
                }
            }
        }
    }
}

impl fmt::Display for TemplateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateNode::Literal(text) => f.write_str(text),
            TemplateNode::Symbol(name) => write!(f, ":{}", name),
            TemplateNode::Splat(name) => write!(f, "*{}", name),
            TemplateNode::Group(children) => {
                f.write_str("(")?;
                for child in children {
                    child.fmt(f)?;
                }
                f.write_str(")")
            }
            TemplateNode::Sequence(children) => {
                for child in children {
                    child.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}
