//! # Configuration Module
//!
//! Two sources of configuration feed a router:
//!
//! - [`RouterConfig`] comes from the environment and decides how string
//!   templates are compiled.
//! - [`RouteTable`] is a route file (YAML, JSON or TOML) describing the
//!   routes themselves, turned into a [`Router`](crate::router::Router)
//!   whose handlers are the handler ids from the file.
//!
//! ## Environment Variables
//!
//! ### `WAYMARK_SEPARATORS`
//!
//! Characters a `:name` placeholder does not cross. Default: `/.?`
//!
//! ### `WAYMARK_ANCHORED`
//!
//! `true` requires templates to match the whole path, `false` allows a
//! prefix match (the remainder is handed to the next router). Default: `true`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use waymark::config::{RouteTable, RouterConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let router = RouteTable::load("routes.yaml")?.into_router(&RouterConfig::from_env())?;
//! println!("{} routes", router.len());
//! # Ok(())
//! # }
//! ```

mod runtime;
mod table;

pub(crate) use runtime::parse_bool;
pub use runtime::RouterConfig;
pub use table::{RouteEntry, RouteTable};
