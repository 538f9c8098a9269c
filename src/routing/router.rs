//! Route table, resolution and reverse lookup.
//!
//! # Responsibilities
//! - Register routes and enforce endpoint uniqueness
//! - Resolve (path, method) to a handler plus typed parameters
//! - Build URLs from endpoint names
//!
//! # Design Decisions
//! - Registration needs `&mut self`; resolution only `&self`, so a router
//!   frozen behind an `Arc` is read concurrently without locks
//! - O(1) static lookup via HashMap
//! - O(n) dynamic scan in registration order, first match wins
//! - Method checked before the pattern on the hot path
//! - A path routed only under other methods is reported as
//!   `MethodNotAllowed`, computed on the failure path only
//! - Re-registering a static path is an error, not an overwrite

use std::collections::{BTreeSet, HashMap};

use crate::routing::error::RoutingError;
use crate::routing::params::Params;
use crate::routing::route::Route;

/// Method used when a route is registered without any.
pub const DEFAULT_METHOD: &str = "GET";

/// Handlers that can name themselves.
///
/// Used to derive an endpoint name when none is given at registration.
pub trait NamedHandler {
    fn handler_name(&self) -> &str;
}

#[derive(Debug, Clone)]
enum Slot {
    Static(String),
    Dynamic(usize),
}

/// The route table.
#[derive(Debug, Clone)]
pub struct Router<H> {
    static_routes: HashMap<String, Route<H>>,
    dynamic_routes: Vec<Route<H>>,
    endpoints: HashMap<String, Slot>,
    /// Registration order across both kinds, for listing.
    order: Vec<Slot>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self {
            static_routes: HashMap::new(),
            dynamic_routes: Vec::new(),
            endpoints: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route under an explicit endpoint name.
    ///
    /// An empty `methods` list means `GET`. On error the table is unchanged.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        path: &str,
        handler: H,
        methods: &[S],
        endpoint: &str,
    ) -> Result<(), RoutingError> {
        if self.endpoints.contains_key(endpoint) {
            return Err(RoutingError::DuplicateEndpoint(endpoint.to_string()));
        }

        let route = if methods.is_empty() {
            Route::new(path, handler, [DEFAULT_METHOD], endpoint)?
        } else {
            Route::new(path, handler, methods, endpoint)?
        };

        let slot = if route.is_static() {
            if self.static_routes.contains_key(path) {
                return Err(RoutingError::DuplicatePath(path.to_string()));
            }
            self.static_routes.insert(path.to_string(), route);
            Slot::Static(path.to_string())
        } else {
            self.dynamic_routes.push(route);
            Slot::Dynamic(self.dynamic_routes.len() - 1)
        };

        tracing::debug!(endpoint = %endpoint, path = %path, "Route registered");
        self.endpoints.insert(endpoint.to_string(), slot.clone());
        self.order.push(slot);
        Ok(())
    }

    /// Resolve a request path and method.
    ///
    /// `path` must already be decoded; `method` must be upper-case.
    pub fn resolve(&self, path: &str, method: &str) -> Result<(&H, Params), RoutingError> {
        if let Some(route) = self.static_routes.get(path) {
            if route.allows(method) {
                return Ok((route.handler(), Params::new()));
            }
            return Err(method_not_allowed(method, path, route.methods()));
        }

        for route in &self.dynamic_routes {
            if !route.allows(method) {
                continue;
            }
            if let Some(params) = route.matches(path) {
                return Ok((route.handler(), params));
            }
        }

        let allowed: BTreeSet<&str> = self
            .dynamic_routes
            .iter()
            .filter(|route| !route.allows(method) && route.matches(path).is_some())
            .flat_map(|route| route.methods())
            .collect();

        if allowed.is_empty() {
            Err(RoutingError::NotFound(path.to_string()))
        } else {
            Err(method_not_allowed(method, path, allowed))
        }
    }

    /// Build the URL of a named endpoint.
    pub fn url_for(&self, endpoint: &str, params: &Params) -> Result<String, RoutingError> {
        self.endpoint(endpoint)
            .ok_or_else(|| RoutingError::UnknownEndpoint(endpoint.to_string()))?
            .url(params)
    }

    /// Look up a route by endpoint name.
    pub fn endpoint(&self, name: &str) -> Option<&Route<H>> {
        self.endpoints.get(name).and_then(|slot| self.slot(slot))
    }

    /// All routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.order.iter().filter_map(move |slot| self.slot(slot))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn slot(&self, slot: &Slot) -> Option<&Route<H>> {
        match slot {
            Slot::Static(path) => self.static_routes.get(path),
            Slot::Dynamic(index) => self.dynamic_routes.get(*index),
        }
    }
}

impl<H: NamedHandler> Router<H> {
    /// Register a route.
    ///
    /// An empty `methods` slice means `GET`; `endpoint` defaults to the
    /// handler's name.
    pub fn add_route(
        &mut self,
        path: &str,
        handler: H,
        methods: &[&str],
        endpoint: Option<&str>,
    ) -> Result<(), RoutingError> {
        let endpoint = match endpoint {
            Some(name) => name.to_string(),
            None => handler.handler_name().to_string(),
        };
        self.insert(path, handler, methods, &endpoint)
    }

    /// Start a route registration.
    pub fn route(&mut self, path: impl Into<String>) -> RouteBuilder<'_, H> {
        RouteBuilder {
            router: self,
            path: path.into(),
            methods: Vec::new(),
            endpoint: None,
        }
    }
}

/// Fluent registration, finished by [`RouteBuilder::handler`].
#[must_use = "a route is only registered once `handler` is called"]
pub struct RouteBuilder<'r, H> {
    router: &'r mut Router<H>,
    path: String,
    methods: Vec<String>,
    endpoint: Option<String>,
}

impl<H: NamedHandler> RouteBuilder<'_, H> {
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods.extend(methods.into_iter().map(Into::into));
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn handler(self, handler: H) -> Result<(), RoutingError> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| handler.handler_name().to_string());
        self.router
            .insert(&self.path, handler, self.methods.as_slice(), &endpoint)
    }
}

fn method_not_allowed<'a>(
    method: &str,
    path: &str,
    allowed: impl IntoIterator<Item = &'a str>,
) -> RoutingError {
    let mut allowed: Vec<String> = allowed.into_iter().map(str::to_string).collect();
    allowed.sort();
    allowed.dedup();
    RoutingError::MethodNotAllowed {
        method: method.to_string(),
        path: path.to_string(),
        allowed,
    }
}
