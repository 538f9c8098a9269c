//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listener before any traffic is accepted
//! - Turn bind failures into actionable errors
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The route table is frozen before the listener is bound

use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Errors raised while preparing to serve.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid bind address \"{0}\"")]
    Address(String),

    #[error("Port {0} is already in use, choose another one")]
    PortInUse(u16),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Bind the configured address.
pub async fn bind_listener(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|_| StartupError::Address(config.bind_address.clone()))?;

    let listener = TcpListener::bind(addr).await.map_err(|e| match e.kind() {
        io::ErrorKind::AddrInUse => StartupError::PortInUse(addr.port()),
        _ => StartupError::Bind { addr, source: e },
    })?;

    tracing::info!(address = %addr, "Listener bound");
    Ok(listener)
}
