//! Stand-in backend binary.
//!
//! Serves a fresh 12x12 plains world with seeded content. Bind address
//! comes from `HEXCRAWL_STUB_HOST` / `HEXCRAWL_STUB_PORT` (default
//! `0.0.0.0:8000`); log filtering from `RUST_LOG`.

use std::sync::Arc;

use hexcrawl_stub::{AppState, ServerConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the environment is invalid or the server cannot
/// bind or serve.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_env()?;
    info!(host = config.host, port = config.port, "hexcrawl-stub starting");

    let state = Arc::new(AppState::new());
    start_server(&config, state).await?;

    Ok(())
}
