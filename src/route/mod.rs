//! # Route Module
//!
//! A [`Route`] binds one compiled [`Pattern`](crate::pattern::Pattern) to a
//! handler, a defaults map, non-path [`Conditions`] and an optional name.
//!
//! Routes provide the three per-route operations the router builds on:
//!
//! - [`Route::score`] - generation-time specificity
//! - [`Route::extras`] - options that are not part of the path
//! - [`Route::qualifies`] - verb and predicate checks during recognition

mod conditions;
mod core;

pub use self::core::{Params, Route};
pub use conditions::{Conditions, Predicate, RoutePath};
