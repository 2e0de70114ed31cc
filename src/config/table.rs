use anyhow::{bail, Context};
use http::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use super::RouterConfig;
use crate::pattern::Pattern;
use crate::route::{Conditions, Params};
use crate::router::{Router, RouterBuilder};

/// A route table document
///
/// ```yaml
/// routes:
///   - path: /books(/:action(.:format))
///     name: books
///     handler: books#index
///     verb: GET
///     requirements:
///       format: (html|json)
///     defaults:
///       controller: books
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One route of a [`RouteTable`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    /// Route template
    pub path: String,
    /// Name used for named generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Handler identifier, handed back on recognition
    pub handler: String,
    /// Exact request method this route is limited to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    /// Overrides the router-wide anchoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchored: Option<bool>,
    /// Overrides the router-wide separators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separators: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requirements: BTreeMap<String, String>,
    /// Default params; `null` declares a present-but-nil default
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: Params,
    /// Predicate name to regex, evaluated on the request adapter
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conditions: BTreeMap<String, String>,
}

impl RouteTable {
    /// Load a route table, choosing the format by extension
    ///
    /// `.yaml`/`.yml` are read as YAML, `.toml` as TOML and anything else
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let table: RouteTable = match extension.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML route table {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("invalid TOML route table {}", path.display()))?,
            _ => serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON route table {}", path.display()))?,
        };

        info!(
            path = %path.display(),
            routes_count = table.routes.len(),
            "Route table loaded"
        );
        Ok(table)
    }

    /// Register every entry, in file order, on a new router
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending entry if a template,
    /// requirement, verb or condition is invalid.
    pub fn into_router(self, config: &RouterConfig) -> anyhow::Result<Router<String>> {
        let mut builder = RouterBuilder::new().with_config(config.clone());
        for (index, entry) in self.routes.into_iter().enumerate() {
            let label = format!("route #{} ({})", index, entry.path);
            entry
                .register(&mut builder, config)
                .with_context(|| format!("invalid {}", label))?;
        }
        Ok(builder.build())
    }
}

impl RouteEntry {
    fn register(
        self,
        builder: &mut RouterBuilder<String>,
        config: &RouterConfig,
    ) -> anyhow::Result<()> {
        let pattern = Pattern::builder(&self.path)
            .requirements(self.requirements)
            .separators(self.separators.as_deref().unwrap_or(&config.separators))
            .anchored(self.anchored.unwrap_or(config.anchored))
            .build()?;

        let mut conditions = Conditions::new(pattern);
        if let Some(verb) = &self.verb {
            conditions = conditions.verb(parse_method(verb)?);
        }
        for (name, regex) in &self.conditions {
            conditions = conditions.predicate(name, regex);
        }

        builder.add_route(self.handler, conditions, self.defaults, self.name.as_deref())?;
        Ok(())
    }
}

fn parse_method(verb: &str) -> anyhow::Result<Method> {
    let upper = verb.trim().to_ascii_uppercase();
    if upper.is_empty() {
        bail!("empty verb");
    }
    Method::from_bytes(upper.as_bytes()).with_context(|| format!("invalid verb '{}'", verb))
}
