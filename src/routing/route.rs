//! A single path-to-handler binding.

use std::collections::BTreeSet;

use crate::routing::error::RoutingError;
use crate::routing::matcher::{self, PathMatcher};
use crate::routing::params::{ParamType, Params};

/// One registered route.
///
/// Static routes (no `<type:name>` marker) match by string equality; dynamic
/// routes carry a compiled [`PathMatcher`].
#[derive(Debug, Clone)]
pub struct Route<H> {
    path: String,
    handler: H,
    methods: BTreeSet<String>,
    endpoint: String,
    matcher: Option<PathMatcher>,
}

impl<H> Route<H> {
    /// Build a route. Methods are upper-cased; defaulting happens in the router.
    pub fn new<I, S>(
        path: impl Into<String>,
        handler: H,
        methods: I,
        endpoint: impl Into<String>,
    ) -> Result<Self, RoutingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = path.into();
        let matcher = if matcher::is_dynamic(&path) {
            Some(PathMatcher::compile(&path)?)
        } else {
            None
        };

        Ok(Self {
            methods: methods
                .into_iter()
                .map(|m| m.as_ref().to_ascii_uppercase())
                .collect(),
            path,
            handler,
            endpoint: endpoint.into(),
            matcher,
        })
    }

    /// Test a concrete path against this route.
    pub fn matches(&self, path: &str) -> Option<Params> {
        match &self.matcher {
            None => (path == self.path).then(Params::new),
            Some(matcher) => matcher.matches(path),
        }
    }

    pub fn allows(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub fn is_static(&self) -> bool {
        self.matcher.is_none()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Allowed methods, sorted.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build a concrete URL for this route.
    pub fn url(&self, params: &Params) -> Result<String, RoutingError> {
        match &self.matcher {
            None => Ok(self.path.clone()),
            Some(matcher) => matcher.build(&self.endpoint, params),
        }
    }

    /// Declared parameters in pattern order (empty for static routes).
    pub fn params(&self) -> Vec<(&str, ParamType)> {
        self.matcher
            .as_ref()
            .map(|m| m.params().collect())
            .unwrap_or_default()
    }
}
