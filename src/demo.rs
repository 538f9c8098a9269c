//! Sample application served by `tinyweb run`.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde_json::json;

use tinyweb::{handler, App, AppConfig, AppRequestExt, Blueprint, Params, RoutingError};

/// Build the sample app on top of `config`.
pub fn build_app(config: AppConfig) -> Result<App, RoutingError> {
    let mut app = App::new(config);

    app.add_route("/", handler("home", home), &[], None)?;
    app.add_route("/about", handler("about", about), &[], None)?;
    app.route("/users/<int:user_id>")
        .endpoint("user_detail")
        .handler(handler("user", user))?;
    app.route("/users")
        .methods(["POST"])
        .handler(handler("create_user", create_user))?;
    app.add_route(
        "/files/<path:filepath>",
        handler("file_info", file_info),
        &["GET", "HEAD"],
        None,
    )?;

    let mut blog = Blueprint::new("blog").with_prefix("/blog");
    blog.add_route("/", handler("index", blog_index), &[], None)
        .add_route("/<str:slug>", handler("post", blog_post), &[], None);
    app.register_blueprint(&blog)?;

    Ok(app)
}

async fn home(request: Request, _params: Params) -> impl IntoResponse {
    let about = request
        .url_for("about", &Params::new())
        .unwrap_or_else(|_| "/about".to_string());
    Html(format!(
        "<h1>Welcome</h1><p><a href=\"{about}\">About this site</a></p>"
    ))
}

async fn about(_request: Request, _params: Params) -> impl IntoResponse {
    Html(format!("<p>tinyweb {}</p>", env!("CARGO_PKG_VERSION")))
}

async fn user(request: Request, params: Params) -> impl IntoResponse {
    let id = params.get_int("user_id").unwrap_or_default();
    let url = request.url_for("user_detail", &params).ok();
    Json(json!({ "id": id, "url": url }))
}

async fn create_user(_request: Request, _params: Params) -> impl IntoResponse {
    (StatusCode::CREATED, Json(json!({ "created": true })))
}

async fn file_info(_request: Request, params: Params) -> impl IntoResponse {
    Json(json!({ "filepath": params.get_str("filepath") }))
}

async fn blog_index(request: Request, _params: Params) -> impl IntoResponse {
    let first = request
        .url_for("blog.post", &Params::new().with("slug", "hello-world"))
        .unwrap_or_default();
    Html(format!("<ul><li><a href=\"{first}\">Hello, world</a></li></ul>"))
}

async fn blog_post(_request: Request, params: Params) -> impl IntoResponse {
    Json(params)
}
