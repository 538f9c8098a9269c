//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router whose fallback dispatches into the App
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{request_id::PropagateRequestIdLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app::App;
use crate::http::request::{request_id_layer, RequestIdExt};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;

/// HTTP server for an [`App`].
pub struct HttpServer {
    router: Router,
    app: Arc<App>,
}

impl HttpServer {
    /// Freeze the app and build the service around it.
    pub fn new(app: App) -> Self {
        let app = Arc::new(app);
        let router = Self::build_router(Arc::clone(&app));
        Self { router, app }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(app: Arc<App>) -> Router {
        let request_timeout = Duration::from_secs(app.config().timeouts.request_secs);

        Router::new()
            .fallback(dispatch_handler)
            .with_state(app)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = request.request_id().unwrap_or("unknown"),
                )
            }))
            .layer(request_id_layer())
    }

    /// The axum service, for embedding or in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            app = %self.app.config().app.name,
            routes = self.app.router().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn dispatch_handler(State(app): State<Arc<App>>, request: Request) -> Response {
    app.dispatch(request).await
}
