//! Terminal entry point for the hexcrawl world editor.
//!
//! Loads configuration, renders the world once, then reads editor
//! commands from standard input until `quit` or end of input. Logs go to
//! standard error so they never interleave with the rendered grid.
//!
//! ```text
//! hexcrawl-editor [--config <path>]     (or HEXCRAWL_CONFIG=<path>)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hexcrawl_editor::cli::{Session, print_view};
use hexcrawl_editor::config::LogFormat;
use hexcrawl_editor::{EditorConfig, EditorController, EditorState};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or standard input cannot
/// be read. A failed initial refresh is reported and the session starts
/// anyway.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = EditorConfig::load(cli.config.as_deref())?;

    init_tracing(config.log_format);
    info!(
        backend_url = config.backend_url,
        initial_mode = %config.initial_mode,
        spawn_table = config.spawn_table,
        "hexcrawl-editor starting"
    );

    let controller = Arc::new(EditorController::from_config(&config));
    let state = EditorState::from_config(&config);

    match controller.refresh().await {
        Ok(_) => print_view(controller.view()).await,
        Err(e) => {
            error!(error = %e, "initial refresh failed");
            println!("error: {e}");
        }
    }

    let mut session = Session::new(controller, state);
    session.run(BufReader::new(tokio::io::stdin())).await?;

    info!("hexcrawl-editor exiting");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Terminal editor for a hexcrawl world backend.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file; environment variables still override it.
    #[arg(short, long, env = "HEXCRAWL_CONFIG")]
    config: Option<PathBuf>,
}
