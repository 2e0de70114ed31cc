use http::Method;
use std::collections::{BTreeMap, HashSet};

use super::conditions::Predicate;
use crate::error::ConditionError;
use crate::pattern::Pattern;
use crate::request::{AdapterFactory, RequestAdapter, RequestEnv};

/// Parameter map used for defaults, recognized params and generation input
///
/// A key mapped to `None` is present but nil; presence alone matters when
/// generation resolves a value.
pub type Params = BTreeMap<String, Option<String>>;

/// One entry of the route table
///
/// Immutable once registered. `H` is the handler reference, opaque to the
/// router.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pattern: Pattern,
    handler: H,
    defaults: Params,
    verb: Option<Method>,
    predicates: Vec<Predicate>,
    name: Option<String>,
    extras: Params,
}

impl<H> Route<H> {
    pub(crate) fn new(
        pattern: Pattern,
        handler: H,
        defaults: Params,
        verb: Option<Method>,
        predicates: Vec<Predicate>,
        name: Option<String>,
    ) -> Self {
        let extras = defaults
            .iter()
            .filter(|(k, _)| !pattern.declares(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self {
            pattern,
            handler,
            defaults,
            verb,
            predicates,
            name,
            extras,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    #[must_use]
    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn verb(&self) -> Option<&Method> {
        self.verb.as_ref()
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Defaults whose keys are not placeholders of the path
    #[must_use]
    pub fn extra_defaults(&self) -> &Params {
        &self.extras
    }

    /// Number of this route's placeholder names present in `available`
    ///
    /// Only generation ranks routes this way; recognition goes by
    /// registration order.
    #[must_use]
    pub fn score(&self, available: &HashSet<&str>) -> usize {
        self.pattern
            .names()
            .filter(|name| available.contains(name))
            .count()
    }

    /// Entries of `options` that are not placeholders of the path
    #[must_use]
    pub fn extras(&self, options: &Params) -> Params {
        options
            .iter()
            .filter(|(k, _)| !self.pattern.declares(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Whether every non-path condition holds for `env`
    ///
    /// The verb must equal the request method exactly; each predicate is
    /// evaluated on an adapter built from `env` (only if the route has
    /// predicates) and its result must match the predicate's regex.
    ///
    /// # Errors
    ///
    /// Returns a [`ConditionError`] if the adapter fails to evaluate a predicate.
    pub fn qualifies(
        &self,
        env: &RequestEnv,
        adapters: &dyn AdapterFactory,
    ) -> Result<bool, ConditionError> {
        let mut adapter = None;
        self.qualifies_with(env, adapters, &mut adapter)
    }

    /// [`qualifies`](Self::qualifies) with a caller-owned adapter slot, so one
    /// adapter serves every route tried for the same request
    pub(crate) fn qualifies_with<'e>(
        &self,
        env: &'e RequestEnv,
        adapters: &dyn AdapterFactory,
        adapter: &mut Option<Box<dyn RequestAdapter + 'e>>,
    ) -> Result<bool, ConditionError> {
        if let Some(verb) = &self.verb {
            if *verb != env.request_method {
                return Ok(false);
            }
        }

        for predicate in &self.predicates {
            let active = adapter.get_or_insert_with(|| adapters.adapt(env));
            let value = active
                .evaluate(predicate.name())
                .map_err(|e| ConditionError::new(predicate.name(), e))?;
            if !predicate.accepts(&value) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
