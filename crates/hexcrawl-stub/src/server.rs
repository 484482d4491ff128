//! Stub HTTP server lifecycle management.
//!
//! [`start_server`] binds the configured address and serves until the
//! process exits. [`spawn_on`] serves on an already-bound listener in a
//! background task, which is how integration tests get an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Configuration for the stub server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Read `HEXCRAWL_STUB_HOST` / `HEXCRAWL_STUB_PORT`, falling back to
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the port is not a valid `u16`.
    pub fn from_env() -> Result<Self, ServerError> {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("HEXCRAWL_STUB_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("HEXCRAWL_STUB_PORT") {
            config.port = port
                .parse()
                .map_err(|e| ServerError::Config(format!("HEXCRAWL_STUB_PORT={port:?}: {e}")))?;
        }
        Ok(config)
    }
}

/// Start the stub HTTP server.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "stub backend listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Serve `state` on an already-bound listener in a background task.
///
/// Returns the bound address and the task handle; abort the handle to
/// stop serving.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the listener has no local address.
pub fn spawn_on(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(SocketAddr, JoinHandle<Result<(), ServerError>>), ServerError> {
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("listener has no address: {e}")))?;
    let router = build_router(state);

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Serve(format!("serve error: {e}")))
    });

    info!(%addr, "stub backend listening");
    Ok((addr, handle))
}

/// Errors that can occur when starting or running the stub server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Environment configuration was invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
