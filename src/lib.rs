//! # waymark
//!
//! **waymark** is a route template engine: it turns templates such as
//! `/:controller(/:action(/:id(.:format)))` into matchers that recognize
//! request paths, and renders paths back from the same templates.
//!
//! ## Overview
//!
//! A route table is an ordered list of routes. Each route binds a compiled
//! template to a handler, a defaults map, optional verb and predicate
//! conditions, and an optional name. The table answers two questions:
//!
//! - **Recognition**: which route does this request belong to, and what are
//!   its params? Routes are tried in registration order and the first one
//!   that matches and qualifies wins.
//! - **Generation**: given some params, what path reaches a route? The
//!   named route, or the one declaring the most of the given names, renders
//!   its template. Optional groups whose values are missing are left out.
//!
//! ## Architecture
//!
//! - **[`template`]** - Parses the template mini-language into a tree
//! - **[`pattern`]** - Compiles a tree into a regex matcher with requirements
//! - **[`route`]** - A pattern plus handler, defaults, conditions and name
//! - **[`router`]** - The route table: registration, recognition, generation
//! - **[`generator`]** - Renders a path from a route's template tree
//! - **[`request`]** - The request environment and predicate adapters
//! - **[`config`]** - Environment configuration and route table files
//! - **[`logging`]** - Structured logging setup
//! - **[`cli`]** - The `waymark` command-line front end
//! - **[`error`]** - Error types
//!
//! ### Recognition Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as HTTP layer
//!     participant Router
//!     participant Pattern
//!     participant Route
//!     participant Adapter as RequestAdapter
//!
//!     Host->>Router: recognize(&mut env)
//!     loop routes in registration order
//!         Router->>Pattern: match_path(env.path_info)
//!         Pattern-->>Router: captures, consumed
//!         Router->>Route: qualifies (verb, predicates)
//!         Route->>Adapter: evaluate(name) (adapter built once)
//!         Adapter-->>Route: value
//!     end
//!     Router->>Router: shift prefix onto script_name if unanchored
//!     Router-->>Host: route, handler, defaults + captures
//! ```
//!
//! ## Template Language
//!
//! | Syntax       | Meaning                                                  |
//! |--------------|----------------------------------------------------------|
//! | `text`       | Literal text, matched verbatim                           |
//! | `:name`      | Placeholder; by default one or more non-separator chars  |
//! | `*name`      | Catch-all; by default anything, including separators     |
//! | `( ... )`    | Optional group, nestable                                 |
//!
//! Separators default to `/`, `.` and `?`.
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use waymark::{Conditions, Params, RequestEnv, Router};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = Router::builder();
//! builder.add_route(
//!     "books",
//!     Conditions::new("/books(/:action(.:format))").verb(Method::GET),
//!     [("controller".to_string(), Some("books".to_string()))].into(),
//!     Some("books"),
//! )?;
//! let router = builder.build();
//!
//! let mut env = RequestEnv::new("/books/list.rss");
//! let recognized = router.recognize(&mut env)?.expect("route matches");
//! assert_eq!(recognized.params["controller"].as_deref(), Some("books"));
//! assert_eq!(recognized.params["action"].as_deref(), Some("list"));
//! assert_eq!(recognized.params["format"].as_deref(), Some("rss"));
//!
//! let options: Params = [("action".to_string(), Some("show".to_string()))].into();
//! let (path, _) = router.generate(Some("books"), &options, &Params::new())?;
//! assert_eq!(path, "/books/show");
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! | Variable                        | Default | Effect                                |
//! |---------------------------------|---------|---------------------------------------|
//! | `WAYMARK_SEPARATORS`            | `/.?`   | Separators for string templates       |
//! | `WAYMARK_ANCHORED`              | `true`  | Full-path vs prefix matching          |
//! | `WAYMARK_LOG_LEVEL`             | `info`  | Log level                             |
//! | `WAYMARK_LOG_FORMAT`            | `json`  | `json` or `pretty`                    |
//! | `WAYMARK_LOG_TARGET_FILTER`     | unset   | Extra filter directives               |
//! | `WAYMARK_LOG_ASYNC`             | `false` | Non-blocking log output               |
//! | `WAYMARK_LOG_INCLUDE_LOCATION`  | `false` | File and line in log events           |

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod pattern;
pub mod request;
pub mod route;
pub mod router;
pub mod template;

pub use config::{RouteEntry, RouteTable, RouterConfig};
pub use error::{ConditionError, RoutingError, TemplateError};
pub use generator::GenerateConfig;
pub use pattern::{Pattern, PatternBuilder, PatternMatch};
pub use request::{AdapterFactory, EnvAdapterFactory, RequestAdapter, RequestEnv};
pub use route::{Conditions, Params, Route};
pub use router::{Dispatch, Recognized, Router, RouterBuilder};
pub use template::{parse, TemplateNode};
