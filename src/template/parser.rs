use std::collections::HashSet;
use std::iter::Peekable;
use std::str::CharIndices;

use super::TemplateNode;
use crate::error::TemplateError;

/// Parse a path template into a [`TemplateNode`] tree
///
/// Grammar:
///
/// ```text
/// template := segment*
/// segment  := literal | ':' name | '*' name | '(' template ')'
/// name     := [A-Za-z_][A-Za-z0-9_]*
/// ```
///
/// Runs of literal characters fold into a single `Literal`; the returned
/// root is always a `Sequence`.
///
/// # Errors
///
/// Returns a [`TemplateError`] for unbalanced parentheses, a sigil without a
/// valid name, or a name declared twice.
///
/// # Example
///
/// ```rust
/// use waymark::template::parse;
///
/// let tree = parse("/messages/:id(.:format)").unwrap();
/// assert_eq!(tree.names(), vec!["id", "format"]);
/// assert_eq!(tree.required_names(), vec!["id"]);
/// assert_eq!(tree.to_string(), "/messages/:id(.:format)");
/// ```
pub fn parse(template: &str) -> Result<TemplateNode, TemplateError> {
    Parser::new(template).run()
}

struct Parser<'t> {
    template: &'t str,
    chars: Peekable<CharIndices<'t>>,
    /// Enclosing sequences, each with the offset of the `(` that suspended it
    open: Vec<(usize, Vec<TemplateNode>)>,
    current: Vec<TemplateNode>,
    literal: String,
    seen: HashSet<String>,
}

impl<'t> Parser<'t> {
    fn new(template: &'t str) -> Self {
        Self {
            template,
            chars: template.char_indices().peekable(),
            open: Vec::new(),
            current: Vec::new(),
            literal: String::new(),
            seen: HashSet::new(),
        }
    }

    fn run(mut self) -> Result<TemplateNode, TemplateError> {
        while let Some((position, c)) = self.chars.next() {
            match c {
                '(' => {
                    self.flush_literal();
                    let outer = std::mem::take(&mut self.current);
                    self.open.push((position, outer));
                }
                ')' => {
                    self.flush_literal();
                    let Some((_, outer)) = self.open.pop() else {
                        return Err(TemplateError::UnexpectedGroupClose {
                            template: self.template.to_string(),
                            position,
                        });
                    };
                    let children = std::mem::replace(&mut self.current, outer);
                    self.current.push(TemplateNode::Group(children));
                }
                ':' | '*' => {
                    self.flush_literal();
                    let name = self.read_name(position)?;
                    let node = if c == ':' {
                        TemplateNode::Symbol(name)
                    } else {
                        TemplateNode::Splat(name)
                    };
                    self.current.push(node);
                }
                other => self.literal.push(other),
            }
        }

        self.flush_literal();
        if let Some((position, _)) = self.open.last() {
            return Err(TemplateError::UnclosedGroup {
                template: self.template.to_string(),
                position: *position,
            });
        }
        Ok(TemplateNode::Sequence(self.current))
    }

    fn read_name(&mut self, sigil_position: usize) -> Result<String, TemplateError> {
        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            let valid = if name.is_empty() {
                c.is_ascii_alphabetic() || c == '_'
            } else {
                c.is_ascii_alphanumeric() || c == '_'
            };
            if !valid {
                break;
            }
            name.push(c);
            self.chars.next();
        }

        if name.is_empty() {
            return Err(TemplateError::InvalidName {
                template: self.template.to_string(),
                position: sigil_position,
            });
        }
        if !self.seen.insert(name.clone()) {
            return Err(TemplateError::DuplicateName {
                template: self.template.to_string(),
                name,
            });
        }
        Ok(name)
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.current.push(TemplateNode::Literal(text));
        }
    }
}
