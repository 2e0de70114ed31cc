//! # CLI Module
//!
//! Command-line front end for inspecting a route table file.
//!
//! ## Commands
//!
//! ### `recognize`
//!
//! Resolve a request path to a route:
//!
//! ```bash
//! waymark recognize --routes routes.yaml --method POST --field HTTP_HOST=api.example.org /books/list.rss
//! ```
//!
//! Prints the handler, route name, pattern, params and the rewritten
//! `path_info`/`script_name` as JSON. Exits non-zero with the pass-through
//! status when nothing matches.
//!
//! ### `generate`
//!
//! Build a path from params:
//!
//! ```bash
//! waymark generate --routes routes.yaml --recall action=index controller=tasks id=10
//! waymark generate --routes routes.yaml --name book --escape title="war and peace"
//! ```
//!
//! `KEY=` or `KEY` alone passes a nil value. `--escape` percent-encodes every
//! inserted value.
//!
//! ### `routes`
//!
//! List the table in priority order:
//!
//! ```bash
//! waymark routes --routes routes.yaml
//! ```
//!
//! `--routes` falls back to `WAYMARK_ROUTES`. Separators and anchoring come
//! from `WAYMARK_SEPARATORS` and `WAYMARK_ANCHORED`, logging from the
//! `WAYMARK_LOG_*` variables.

mod commands;


pub use commands::{
    generate_command, load_router, parse_field, parse_param, recognize_command, routes_command,
    run_cli, Cli, Commands,
};
