//! # Request Module
//!
//! The boundary between the route template engine and the HTTP layer that
//! owns the request.
//!
//! - [`RequestEnv`] carries the fields recognition reads and rewrites: the
//!   path, the base path (script name) and the request method, plus any other
//!   environment fields the host chooses to expose.
//! - [`RequestAdapter`] is the capability predicate conditions are evaluated
//!   against. A route registered with `subdomain => /^api$/` asks the adapter
//!   to `evaluate("subdomain")` and tests the result against the regex.
//! - [`AdapterFactory`] builds one adapter per request. The default,
//!   [`EnvAdapterFactory`], answers predicates straight from the env fields.

use http::Method;
use std::collections::HashMap;

/// Mutable per-request routing environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnv {
    /// Path still to be routed (`PATH_INFO`)
    pub path_info: String,
    /// Path already consumed by enclosing routers (`SCRIPT_NAME`)
    pub script_name: String,
    /// HTTP method (`REQUEST_METHOD`)
    pub request_method: Method,
    /// Any other environment fields, keyed as the host names them
    pub fields: HashMap<String, String>,
}

impl RequestEnv {
    /// A `GET` request for `path` with an empty base path
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path_info: path.to_string(),
            script_name: String::new(),
            request_method: Method::GET,
            fields: HashMap::new(),
        }
    }

    /// Replace the request method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.request_method = method;
        self
    }

    /// Add an extra environment field
    #[must_use]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    /// Read a field by name
    ///
    /// `path_info`, `script_name` and `request_method` (in either case) map
    /// to the built-in fields; anything else is looked up in
    /// [`fields`](Self::fields) verbatim, then upper-cased.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "path_info" | "PATH_INFO" => Some(&self.path_info),
            "script_name" | "SCRIPT_NAME" => Some(&self.script_name),
            "request_method" | "REQUEST_METHOD" => Some(self.request_method.as_str()),
            _ => self
                .fields
                .get(name)
                .or_else(|| self.fields.get(&name.to_ascii_uppercase()))
                .map(String::as_str),
        }
    }

    /// Move the first `consumed` bytes of the path onto the base path
    ///
    /// Used after an unanchored route matched only a prefix: `/foo/bar`
    /// with 4 bytes consumed leaves `script_name` ending in `/foo` and
    /// `path_info` = `/bar`.
    pub fn shift_prefix(&mut self, consumed: usize) {
        let rest = self.path_info.split_off(consumed);
        let prefix = std::mem::replace(&mut self.path_info, rest);
        self.script_name.push_str(&prefix);
    }
}

/// Capability interface for evaluating route conditions against a request
pub trait RequestAdapter {
    /// Read a built-in environment field
    fn get_field(&self, name: &str) -> Option<String>;

    /// Evaluate a named predicate, producing the string a condition regex is tested against
    ///
    /// # Errors
    ///
    /// Adapter-specific. Errors propagate out of recognition unchanged.
    fn evaluate(&self, name: &str) -> anyhow::Result<String>;
}

/// Builds a [`RequestAdapter`] for each request that needs one
pub trait AdapterFactory: Send + Sync {
    /// Construct an adapter over `env`
    fn adapt<'a>(&self, env: &'a RequestEnv) -> Box<dyn RequestAdapter + 'a>;
}

/// Default adapter: predicates are answered from the request's own fields
#[derive(Debug, Clone, Copy)]
pub struct EnvAdapter<'a> {
    env: &'a RequestEnv,
}

impl<'a> EnvAdapter<'a> {
    #[must_use]
    pub fn new(env: &'a RequestEnv) -> Self {
        Self { env }
    }
}

impl RequestAdapter for EnvAdapter<'_> {
    fn get_field(&self, name: &str) -> Option<String> {
        self.env.field(name).map(str::to_string)
    }

    fn evaluate(&self, name: &str) -> anyhow::Result<String> {
        self.get_field(name)
            .ok_or_else(|| anyhow::anyhow!("request has no field named '{}'", name))
    }
}

/// Factory for [`EnvAdapter`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvAdapterFactory;

impl AdapterFactory for EnvAdapterFactory {
    fn adapt<'a>(&self, env: &'a RequestEnv) -> Box<dyn RequestAdapter + 'a> {
        Box::new(EnvAdapter::new(env))
    }
}
