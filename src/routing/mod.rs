//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     add_route(path, handler, methods, endpoint)
//!     → matcher.rs (detect <type:name> markers, compile anchored regex)
//!     → route.rs (Route: static or dynamic)
//!     → router.rs (static map / ordered dynamic list / endpoint index)
//!
//! Incoming request (decoded path, upper-case method):
//!     → router.rs: static lookup, then dynamic scan
//!     → Return: (handler, typed Params), NotFound, or MethodNotAllowed
//!
//! Reverse lookup:
//!     url_for(endpoint, params) → concrete path
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always resolves to the same route
//! - First registered dynamic match wins (no specificity scoring)

pub mod error;
pub mod matcher;
pub mod params;
pub mod route;
pub mod router;

pub use error::RoutingError;
pub use params::{ParamType, ParamValue, Params};
pub use route::Route;
pub use router::{NamedHandler, RouteBuilder, Router};
