use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use http::Method;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::config::{RouteTable, RouterConfig};
use crate::generator::GenerateConfig;
use crate::logging::{init_logging_with_config, LogConfig};
use crate::request::RequestEnv;
use crate::route::Params;
use crate::router::{Dispatch, Router, CASCADE_HEADER};

/// Command-line interface for waymark
///
/// Loads a route table file and recognizes or generates paths against it.
#[derive(Parser, Debug)]
#[command(name = "waymark")]
#[command(about = "Recognize and generate paths against a route table", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the route a request path resolves to
    Recognize {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long, env = "WAYMARK_ROUTES")]
        routes: PathBuf,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Extra request field for predicate conditions (NAME=VALUE, repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Request path
        path: String,
    },
    /// Build a path from params
    Generate {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long, env = "WAYMARK_ROUTES")]
        routes: PathBuf,

        /// Use the named route instead of the best-scoring one
        #[arg(short, long)]
        name: Option<String>,

        /// Percent-encode every value inserted into the path
        #[arg(long, default_value_t = false)]
        escape: bool,

        /// Params of the current request (KEY=VALUE, repeatable)
        #[arg(long = "recall", value_parser = parse_param)]
        recall: Vec<(String, Option<String>)>,

        /// Params for the new path (KEY=VALUE; KEY= or KEY alone is nil)
        #[arg(value_parser = parse_param)]
        params: Vec<(String, Option<String>)>,
    },
    /// List the route table in priority order
    Routes {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long, env = "WAYMARK_ROUTES")]
        routes: PathBuf,
    },
}

/// Parse a `NAME=VALUE` request field
pub fn parse_field(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    if name.is_empty() {
        return Err(format!("empty field name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse a `KEY=VALUE` param; `KEY=` and bare `KEY` produce a nil value
pub fn parse_param(s: &str) -> Result<(String, Option<String>), String> {
    let (key, value) = match s.split_once('=') {
        Some((key, "")) => (key, None),
        Some((key, value)) => (key, Some(value.to_string())),
        None => (s, None),
    };
    if key.is_empty() {
        return Err(format!("empty param name in '{}'", s));
    }
    Ok((key.to_string(), value))
}

/// Load a route table file into a router using the environment's [`RouterConfig`]
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or a route is invalid.
pub fn load_router(routes: &Path) -> anyhow::Result<Router<String>> {
    RouteTable::load(routes)?.into_router(&RouterConfig::from_env())
}

/// Recognize `path` and describe the match as pretty JSON
///
/// # Errors
///
/// Returns an error if nothing matches, the method is invalid, or a
/// predicate fails to evaluate.
pub fn recognize_command(
    router: &Router<String>,
    method: &str,
    fields: &[(String, String)],
    path: &str,
) -> anyhow::Result<String> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid method '{}'", method))?;
    let mut env = RequestEnv::new(path).with_method(method);
    for (name, value) in fields {
        env = env.with_field(name, value);
    }

    match router.call(&mut env)? {
        Dispatch::Matched(recognized) => {
            let report = json!({
                "handler": recognized.handler,
                "name": recognized.route.name(),
                "pattern": recognized.route.pattern().source(),
                "params": recognized.params,
                "path_info": env.path_info,
                "script_name": env.script_name,
            });
            Ok(serde_json::to_string_pretty(&report)?)
        }
        Dispatch::Pass(response) => {
            let cascade = response
                .headers()
                .get(CASCADE_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            bail!(
                "{} for {} {} (X-Cascade: {})",
                response.status(),
                env.request_method,
                path,
                cascade
            )
        }
    }
}

/// Generate a path and describe it with its leftover params as pretty JSON
///
/// # Errors
///
/// Returns the routing error if no path can be generated.
pub fn generate_command(
    router: &Router<String>,
    name: Option<&str>,
    escape: bool,
    params: &[(String, Option<String>)],
    recall: &[(String, Option<String>)],
) -> anyhow::Result<String> {
    let options: Params = params.iter().cloned().collect();
    let recall: Params = recall.iter().cloned().collect();

    let config = if escape {
        GenerateConfig::new().parameterize(|_name, value| urlencoding::encode(value).into_owned())
    } else {
        GenerateConfig::new()
    };

    let (path, leftover) = router.generate_with(name, &options, &recall, &config)?;
    let report = json!({
        "path": path,
        "leftover": leftover,
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

/// One line per route: priority, name, verb, pattern and handler
#[must_use]
pub fn routes_command(router: &Router<String>) -> String {
    let mut out = format!("[routes] count={}\n", router.len());
    for (index, route) in router.routes().iter().enumerate() {
        let verb = route.verb().map_or("ANY", Method::as_str);
        out.push_str(&format!(
            "[route] {:>3} {:<16} {:<7} {} -> {}\n",
            index,
            route.name().unwrap_or("-"),
            verb,
            route.pattern(),
            route.handler()
        ));
    }
    out
}

/// Parse the command line and run the selected command
///
/// # Errors
///
/// Returns the command's error; the binary reports it and exits non-zero.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging_with_config(&LogConfig::from_env())?;

    let output = match &cli.command {
        Commands::Recognize {
            routes,
            method,
            fields,
            path,
        } => recognize_command(&load_router(routes)?, method, fields, path)?,
        Commands::Generate {
            routes,
            name,
            escape,
            recall,
            params,
        } => generate_command(&load_router(routes)?, name.as_deref(), *escape, params, recall)?,
        Commands::Routes { routes } => routes_command(&load_router(routes)?),
    };

    println!("{}", output.trim_end());
    Ok(())
}
