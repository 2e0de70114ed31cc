use std::env;

use crate::pattern::DEFAULT_SEPARATORS;

/// How string templates registered on a [`RouterBuilder`](crate::router::RouterBuilder)
/// are compiled.
///
/// Load this at startup using [`RouterConfig::from_env()`], or use
/// [`RouterConfig::default()`] to ignore the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Characters a `:name` placeholder does not cross (default: `/.?`)
    pub separators: String,
    /// Whether templates must match the whole path (default: `true`)
    pub anchored: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.to_string(),
            anchored: true,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let separators = env::var("WAYMARK_SEPARATORS").unwrap_or(defaults.separators);
        let anchored = match env::var("WAYMARK_ANCHORED") {
            Ok(val) => parse_bool(&val).unwrap_or(defaults.anchored),
            Err(_) => defaults.anchored,
        };
        RouterConfig {
            separators,
            anchored,
        }
    }

    #[must_use]
    pub fn with_separators(mut self, separators: &str) -> Self {
        self.separators = separators.to_string();
        self
    }

    #[must_use]
    pub fn with_anchored(mut self, anchored: bool) -> Self {
        self.anchored = anchored;
        self
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
