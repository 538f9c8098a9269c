//! Lightweight web application framework.
//!
//! A typed URL router (`<int:id>`, `<str:name>`, `<path:rest>` parameters,
//! static fast path, reverse lookup) hosted on Axum.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use app::{handler, App, AppRequestExt, Blueprint, Handler};
pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{ParamValue, Params, Router, RoutingError};
