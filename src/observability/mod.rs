//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!
//! logging.rs installs the subscriber:
//!     → EnvFilter (RUST_LOG or observability.log_level)
//!     → fmt layer (pretty or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every request span

pub mod logging;

pub use logging::init_logging;
