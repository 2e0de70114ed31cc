use super::resolve::Resolver;
use super::GenerateConfig;
use crate::template::TemplateNode;

/// Outcome of rendering one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rendered {
    /// The node wrote its text
    Present,
    /// A placeholder under this node had no value
    Absent,
}

/// Walks a template tree and writes the concrete path
pub(crate) struct Renderer<'a, 'r> {
    resolver: &'a Resolver<'r>,
    config: &'a GenerateConfig<'a>,
}

impl<'a, 'r> Renderer<'a, 'r> {
    pub(crate) fn new(resolver: &'a Resolver<'r>, config: &'a GenerateConfig<'a>) -> Self {
        Self { resolver, config }
    }

    /// Render `node` onto `out`
    ///
    /// An absent placeholder makes its enclosing sequence absent. A group
    /// whose body is incomplete writes nothing and itself reports present,
    /// so the collapse stops at the innermost group. Completeness is checked
    /// before anything is written, so `parameterize` only sees values that
    /// end up in the path.
    pub(crate) fn render(&self, node: &TemplateNode, out: &mut String) -> Rendered {
        match node {
            TemplateNode::Literal(text) => {
                out.push_str(text);
                Rendered::Present
            }
            TemplateNode::Symbol(name) | TemplateNode::Splat(name) => {
                match self.resolver.resolve(name) {
                    Some(value) => {
                        out.push_str(&self.config.apply(name, value));
                        Rendered::Present
                    }
                    None => Rendered::Absent,
                }
            }
            TemplateNode::Group(children) => {
                if self.is_complete(children) {
                    self.render_all(children, out);
                }
                Rendered::Present
            }
            TemplateNode::Sequence(children) => {
                if !self.is_complete(children) {
                    return Rendered::Absent;
                }
                self.render_all(children, out)
            }
        }
    }

    /// True when every placeholder outside nested groups resolves
    fn is_complete(&self, children: &[TemplateNode]) -> bool {
        children.iter().all(|child| match child {
            TemplateNode::Literal(_) | TemplateNode::Group(_) => true,
            TemplateNode::Symbol(name) | TemplateNode::Splat(name) => {
                self.resolver.resolve(name).is_some()
            }
            TemplateNode::Sequence(inner) => self.is_complete(inner),
        })
    }

    fn render_all(&self, children: &[TemplateNode], out: &mut String) -> Rendered {
        for child in children {
            if self.render(child, out) == Rendered::Absent {
                return Rendered::Absent;
            }
        }
        Rendered::Present
    }
}
