//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Request;
use axum::Json;
use serde_json::json;
use tinyweb::{handler, App, AppConfig, HttpServer, Params, Shutdown};
use tokio::net::TcpListener;

/// App with the routes used across the integration tests.
pub fn sample_app() -> App {
    let mut app = App::new(AppConfig::default());
    app.add_route("/", handler("home", |_req, _p| async { "Home" }), &[], None)
        .unwrap();
    app.add_route("/about", handler("about", |_req, _p| async { "About" }), &[], None)
        .unwrap();
    app.add_route(
        "/users/<int:id>",
        handler("user", |_req, params: Params| async move { Json(params) }),
        &[],
        None,
    )
    .unwrap();
    app.add_route(
        "/api/items",
        handler("items", |req: Request, _p| async move {
            json!({ "method": req.method().as_str() }).to_string()
        }),
        &["GET", "POST"],
        None,
    )
    .unwrap();
    app.add_route(
        "/items/<int:id>",
        handler("delete_item", |_req, _p| async { "deleted" }),
        &["DELETE"],
        None,
    )
    .unwrap();
    app
}

/// Start a server for `app` on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(app: App) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = HttpServer::new(app).run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}
