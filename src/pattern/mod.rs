//! # Pattern Module
//!
//! Compiles a parsed template into a [`Pattern`]: a regex matcher with named
//! captures plus the metadata recognition and generation need.
//!
//! ## Compilation
//!
//! The template tree is walked left to right:
//!
//! - literal text is escaped and matched verbatim
//! - `:name` becomes `(?P<name>REQ)`, where `REQ` is the explicit requirement
//!   or one-or-more characters outside the separator set
//! - `*name` becomes `(?P<name>(?s:.*))` unless constrained
//! - a group becomes `(?:...)?`
//!
//! The body sits in one capturing group. Anchored patterns become
//! `^(...)$`; unanchored ones `^(...)(?:$|[SEP])`, so a prefix match stops
//! at a separator and reports how much of the path it consumed.
//!
//! Requirements are Unicode-aware: `\d` also accepts non-ASCII digits.
//! Use `(?-u:\d)` or `[0-9]` for ASCII only.
//!
//! ```rust
//! use waymark::pattern::Pattern;
//!
//! let pattern = Pattern::builder("/foo").anchored(false).build().unwrap();
//! let m = pattern.match_path("/foo/bar").unwrap();
//! assert_eq!(m.consumed, 4);
//! ```

mod builder;
mod core;

pub use builder::PatternBuilder;
pub use self::core::{
    compile, CaptureVec, Pattern, PatternMatch, Requirement, DEFAULT_SEPARATORS,
    MAX_INLINE_CAPTURES, SPLAT_REQUIREMENT,
};
