//! # Router Module
//!
//! The router owns the route table and answers both directions of routing:
//! path → route ([`Router::recognize`]) and route → path
//! ([`Router::generate`]).
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: a [`RouterBuilder`] parses and compiles each template
//!    once and appends the route. [`RouterBuilder::build`] freezes the table.
//!
//! 2. **Serving**: the frozen [`Router`] is read-only. Recognition scans
//!    routes in registration order and returns the first whose pattern
//!    matches and whose verb and predicate conditions hold. Specificity plays
//!    no part. Generation picks the named route, or the route declaring the
//!    most of the supplied names, and renders its template.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use waymark::request::RequestEnv;
//! use waymark::route::{Conditions, Params};
//! use waymark::router::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = Router::builder();
//! builder.add_route(
//!     "messages#show",
//!     Conditions::new("/messages/:id(.:format)").verb(Method::GET),
//!     Params::new(),
//!     Some("message"),
//! )?;
//! let router = builder.build();
//!
//! let mut env = RequestEnv::new("/messages/10.json");
//! let recognized = router.recognize(&mut env)?.expect("route matches");
//! assert_eq!(*recognized.handler, "messages#show");
//! assert_eq!(recognized.params["format"].as_deref(), Some("json"));
//!
//! let options: Params = [("id".to_string(), Some("11".to_string()))].into();
//! let (path, _) = router.generate(Some("message"), &options, &Params::new())?;
//! assert_eq!(path, "/messages/11");
//! # Ok(())
//! # }
//! ```
//!
//! ## Cascading
//!
//! [`Router::call`] turns "no route" into a `404` carrying `X-Cascade: pass`
//! so a chain of routers can move on to the next one.

mod builder;
mod core;
#[cfg(test)]
mod tests;

pub use self::core::{not_found, Dispatch, Recognized, Router, CASCADE_HEADER};
pub use builder::RouterBuilder;
