use crate::route::{Params, Route};

/// Looks up placeholder values for one generation request
///
/// Resolution order is options, then recall, then the route's defaults.
/// Presence decides: a key present with a nil value stops the search.
///
/// Recall is only consulted for required names and for optional names at or
/// before the *boundary*, the last placeholder the caller supplied in
/// `options` (with a non-nil options-or-recall value). Recall can fill in a
/// path up to what was asked for, never past it.
pub(crate) struct Resolver<'r> {
    options: &'r Params,
    recall: &'r Params,
    defaults: &'r Params,
    required: &'r [String],
    names: Vec<&'r str>,
    boundary: Option<usize>,
}

impl<'r> Resolver<'r> {
    pub(crate) fn new<H>(route: &'r Route<H>, options: &'r Params, recall: &'r Params) -> Self {
        let pattern = route.pattern();
        let names: Vec<&str> = pattern.names().collect();
        let boundary = names.iter().rposition(|name| {
            options.get(*name).is_some_and(|value| {
                value.is_some() || recall.get(*name).is_some_and(Option::is_some)
            })
        });

        Self {
            options,
            recall,
            defaults: route.defaults(),
            required: pattern.required_names(),
            names,
            boundary,
        }
    }

    /// The value `name` renders with, or `None` if it is absent
    pub(crate) fn resolve(&self, name: &str) -> Option<&'r str> {
        if let Some(value) = self.options.get(name) {
            return value.as_deref();
        }
        if self.may_recall(name) {
            if let Some(value) = self.recall.get(name) {
                return value.as_deref();
            }
        }
        self.defaults.get(name).and_then(|v| v.as_deref())
    }

    fn may_recall(&self, name: &str) -> bool {
        if self.required.iter().any(|r| r == name) {
            return true;
        }
        match (self.boundary, self.names.iter().position(|n| *n == name)) {
            (Some(boundary), Some(position)) => position <= boundary,
            _ => false,
        }
    }
}
