//! Aerogrid application binary - composition root.
//!
//! Ties together all Aerogrid crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Build the pollution monitor (initial grid refresh)
//! 3. Build the assist engine (builtin knowledge or configured file)
//! 4. Start the periodic data refresh job
//! 5. Start the axum REST API server

mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use aerogrid_api::AppState;
use aerogrid_assist::{AssistEngine, KnowledgeBase};
use aerogrid_core::config::AerogridConfig;
use aerogrid_monitor::{refresh_loop, PollutionMonitor};

use cli::CliArgs;

/// Build the assist engine from config: a knowledge file if one is set,
/// the builtin production set otherwise.
fn build_engine(config: &AerogridConfig) -> Result<AssistEngine, aerogrid_assist::AssistError> {
    let kb = match &config.assist.knowledge_file {
        Some(path) => KnowledgeBase::load(Path::new(path))?,
        None => KnowledgeBase::builtin(),
    };
    AssistEngine::new(kb)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first: the log level may come from it.
    let config_file = args.resolve_config_path();
    let mut config = AerogridConfig::load_or_default(&config_file);
    config.server.port = args.resolve_port(config.server.port);
    let log_level = args.resolve_log_level(&config.general.log_level);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Aerogrid v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), city = %config.general.city, "Configuration loaded");

    // Monitor: construction runs the first grid refresh.
    let monitor = Arc::new(PollutionMonitor::new(config.monitor.clone()));
    tracing::info!("Pollution monitor initialized (10x10 grid)");

    // Assist engine.
    let engine = match build_engine(&config) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build assist engine");
            return Err(e.into());
        }
    };
    tracing::info!("Assist engine ready");

    // Periodic refresh job.
    let refresh_monitor = Arc::clone(&monitor);
    let interval_secs = config.monitor.refresh_interval_secs;
    tokio::spawn(async move {
        refresh_loop(refresh_monitor, interval_secs).await;
    });

    // API server.
    let port = config.server.port;
    let state = AppState::new(config, monitor, engine);
    tracing::info!(port, "Dashboard endpoints at http://127.0.0.1:{}/pm25-data", port);

    aerogrid_api::start_server(state).await?;

    Ok(())
}
