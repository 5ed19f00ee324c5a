//! CLI entrypoint for murmur
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use murmur_application::ChatController;
use murmur_infrastructure::{ConfigLoader, FileConfig, HttpAnswerGateway};
use murmur_presentation::{ChatApp, Cli};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!(e))
            .context("failed to load configuration")?
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint.url = endpoint.clone();
    }
    config.validate()?;

    // Logging goes to a file; stdout belongs to the TUI.
    let _log_guard = init_logging(&cli, &config)?;
    info!(endpoint = %config.endpoint.url, "Starting murmur");

    // === Dependency Injection ===
    let gateway = Arc::new(HttpAnswerGateway::from_config(&config.endpoint)?);

    let controller = match &cli.session_id {
        Some(id) => ChatController::with_session_id(gateway, id.clone()),
        None => ChatController::new(gateway),
    };
    info!(session_id = %controller.session_id(), "conversation session created");

    let cancel = CancellationToken::new();
    let app = ChatApp::new(
        controller,
        config.ui.show_sender_labels,
        config.ui.max_input_len,
        cancel,
    );
    app.run().await?;

    Ok(())
}

/// Initialize file-backed logging based on verbosity level.
fn init_logging(
    cli: &Cli,
    config: &FileConfig,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let directory = config
        .logging
        .directory
        .clone()
        .map(PathBuf::from)
        .or_else(|| dirs::state_dir().map(|d| d.join("murmur")))
        .or_else(|| dirs::data_dir().map(|d| d.join("murmur")))
        .context("could not determine a log directory")?;
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(&directory, "murmur.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(guard)
}
