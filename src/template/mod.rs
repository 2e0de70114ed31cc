//! # Template Module
//!
//! Parses the route template mini-language into a [`TemplateNode`] tree.
//!
//! ## Syntax
//!
//! | Form        | Meaning                                             |
//! |-------------|-----------------------------------------------------|
//! | `text`      | literal text, matched and rendered verbatim         |
//! | `:name`     | named placeholder, stops at separator characters    |
//! | `*name`     | catch-all placeholder, spans separators             |
//! | `( ... )`   | optional group, may nest                            |
//!
//! `/messages/:id(.:format)` declares a required `id` and an optional
//! `format` extension.
//!
//! The tree is produced once per route at registration time and feeds both
//! the matcher ([`crate::pattern`]) and the path generator
//! ([`crate::generator`]).

mod node;
mod parser;
#[cfg(test)]
mod tests;

pub use node::TemplateNode;
pub use parser::parse;
