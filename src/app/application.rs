//! The application object: configuration plus the route table.

use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};

use crate::app::blueprint::Blueprint;
use crate::app::handler::Handler;
use crate::config::AppConfig;
use crate::http::request::{request_path, RequestIdExt};
use crate::http::response::json_error;
use crate::routing::{Params, RouteBuilder, Router, RoutingError};

/// A web application.
///
/// Built mutably during setup, then frozen into an `Arc` and shared with the
/// server. Registration needs `&mut App`, so no route can be added once
/// requests are being served.
#[derive(Debug, Clone)]
pub struct App {
    config: AppConfig,
    router: Router<Handler>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            router: Router::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn router(&self) -> &Router<Handler> {
        &self.router
    }

    /// Register a route. See [`Router::add_route`].
    pub fn add_route(
        &mut self,
        path: &str,
        handler: Handler,
        methods: &[&str],
        endpoint: Option<&str>,
    ) -> Result<(), RoutingError> {
        self.router.add_route(path, handler, methods, endpoint)
    }

    /// Start a fluent route registration.
    pub fn route(&mut self, path: impl Into<String>) -> RouteBuilder<'_, Handler> {
        self.router.route(path)
    }

    /// Register every route of a blueprint.
    ///
    /// All or nothing: if any route fails, none of them are registered.
    pub fn register_blueprint(&mut self, blueprint: &Blueprint) -> Result<(), RoutingError> {
        let mut staged = self.router.clone();
        for route in blueprint.routes() {
            staged.insert(
                &blueprint.full_path(&route.path),
                route.handler.clone(),
                route.methods.as_slice(),
                &blueprint.full_endpoint(&route.endpoint),
            )?;
        }
        tracing::debug!(
            blueprint = %blueprint.name(),
            prefix = blueprint.url_prefix().unwrap_or(""),
            routes = blueprint.routes().len(),
            "Blueprint registered"
        );
        self.router = staged;
        Ok(())
    }

    /// Build the URL of a named endpoint.
    pub fn url_for(&self, endpoint: &str, params: &Params) -> Result<String, RoutingError> {
        self.router.url_for(endpoint, params)
    }

    /// Resolve a request and run its handler.
    ///
    /// `NotFound` becomes 404 and `MethodNotAllowed` 405 (with `Allow`).
    /// The app itself is attached to the request so handlers can call
    /// [`AppRequestExt::url_for`].
    pub async fn dispatch(self: Arc<Self>, mut request: Request) -> Response {
        let path = request_path(&request).into_owned();
        let method = request.method().as_str().to_ascii_uppercase();

        let (handler, params) = match self.router.resolve(&path, &method) {
            Ok((handler, params)) => (handler.clone(), params),
            Err(err) => {
                tracing::debug!(
                    request_id = request.request_id().unwrap_or("unknown"),
                    method = %method,
                    path = %path,
                    error = %err,
                    "Request not routed"
                );
                return err.into_response();
            }
        };

        tracing::debug!(
            request_id = request.request_id().unwrap_or("unknown"),
            handler = %handler.name(),
            "Dispatching request"
        );
        request.extensions_mut().insert(Arc::clone(&self));
        let response = handler.call(request, params).await;
        self.expose_error(response)
    }

    /// In debug mode, replace the opaque body of a handler's routing error
    /// with the error message.
    fn expose_error(&self, mut response: Response) -> Response {
        if !self.config.app.debug {
            return response;
        }
        match response.extensions_mut().remove::<RoutingError>() {
            Some(err) => json_error(response.status(), err.to_string()),
            None => response,
        }
    }
}

/// Reverse lookup from inside a handler.
pub trait AppRequestExt {
    /// Build the URL of a named endpoint of the app serving this request.
    ///
    /// Fails with [`RoutingError::NoApplication`] when the request did not
    /// come through [`App::dispatch`].
    fn url_for(&self, endpoint: &str, params: &Params) -> Result<String, RoutingError>;
}

impl AppRequestExt for Request {
    fn url_for(&self, endpoint: &str, params: &Params) -> Result<String, RoutingError> {
        self.extensions()
            .get::<Arc<App>>()
            .ok_or_else(|| RoutingError::NoApplication(endpoint.to_string()))?
            .url_for(endpoint, params)
    }
}
