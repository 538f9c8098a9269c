//! Application subsystem: the host side of the router.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     App::new(config)
//!     → add_route / route(..).handler(..) / register_blueprint
//!     → Arc<App> (frozen)
//!
//! Per request (called by http::server):
//!     App::dispatch(request)
//!     → decode path, upper-case method
//!     → Router::resolve
//!     → Handler::call(request, params)  or  404 / 405 JSON
//! ```

pub mod application;
pub mod blueprint;
pub mod handler;

pub use application::{App, AppRequestExt};
pub use blueprint::Blueprint;
pub use handler::{handler, BoxFuture, Handler};
