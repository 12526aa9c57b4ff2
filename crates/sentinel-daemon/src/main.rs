//! Sentinel Daemon - media screening service
//!
//! Loads the threat dictionary, then serves frame and cross-modal scans over
//! REST until Ctrl+C or SIGTERM.

use clap::Parser;
use sentinel_daemon::error::{DaemonError, DaemonResult};
use sentinel_daemon::{DaemonConfig, Server};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sentinel Daemon CLI
#[derive(Parser)]
#[command(name = "sentineld")]
#[command(
    about = "Sentinel Daemon - visual prompt-injection and deepfake screening",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SENTINEL_CONFIG")]
    config: Option<String>,

    /// Listen address (overrides the config file)
    #[arg(short, long, env = "SENTINEL_LISTEN_ADDR")]
    listen: Option<String>,

    /// Threat dictionary file (overrides the config file)
    #[arg(short, long, env = "SENTINEL_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "SENTINEL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "SENTINEL_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(path) = cli.dictionary {
        config.dictionary.path = Some(path);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        "Starting Sentinel daemon"
    );

    // Dictionary and thresholds are checked here, before the listener binds
    let server = Server::new(config)?;
    server.run().await
}
