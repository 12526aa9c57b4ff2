//! Sentinel CLI - Command-line interface for the Sentinel scan engines
//!
//! This CLI lets operators and developers:
//! - Scan OCR tokens of a frame for visual prompt injection
//! - Compare frame and transcript embeddings for cross-modal consistency
//! - See how text normalizes before matching
//! - Inspect and validate a threat dictionary

use clap::{Parser, Subcommand};
use sentinel_guard::{ScanEngines, SentinelConfig};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

pub use error::{CliError, CliResult};

/// Sentinel CLI application
#[derive(Parser)]
#[command(name = "sentinel")]
#[command(
    about = "Sentinel - visual prompt-injection and deepfake screening CLI",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, env = "SENTINEL_CONFIG")]
    config: Option<String>,

    /// Threat dictionary file (.tsv, .json, .yaml)
    #[arg(short, long, env = "SENTINEL_DICTIONARY")]
    dictionary: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Scan the OCR tokens of one frame for prompt injection
    ScanFrame {
        /// JSON array of tokens (strings or token objects), or @file
        #[arg(short, long)]
        tokens: String,
    },

    /// Check a frame embedding against a transcript embedding
    CrossModal {
        /// JSON array with the frame embedding, or @file
        #[arg(short, long)]
        frame: String,
        /// JSON array with the transcript embedding, or @file
        #[arg(short, long)]
        transcript: String,
    },

    /// Show the normalized form of text (each argument is one OCR token)
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Load, validate and list the threat dictionary
    Dictionary,
}

/// Run using the current process arguments.
pub async fn run() -> CliResult<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    // Execute command
    match &cli.command {
        Commands::ScanFrame { tokens } => {
            commands::scan::execute(tokens, &load_engines(&cli)?, cli.output)
        }
        Commands::CrossModal { frame, transcript } => {
            commands::cross_modal::execute(frame, transcript, &load_engines(&cli)?, cli.output)
        }
        Commands::Normalize { text } => commands::normalize::execute(text, cli.output),
        Commands::Dictionary => commands::dictionary::execute(&load_engines(&cli)?, cli.output),
    }
}

/// Build the engines from config file, environment and flags.
fn load_engines(cli: &Cli) -> CliResult<ScanEngines> {
    let mut config = SentinelConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.dictionary {
        debug!(path = %path.display(), "dictionary path overridden on the command line");
        config = config.with_dictionary_path(path);
    }
    let engines = config.build_engines()?;
    debug!(
        phrases = engines.injection.dictionary().len(),
        block_threshold = engines.injection.matcher().config().block_threshold,
        similarity_threshold = engines.cross_modal.scorer().threshold(),
        "engines ready"
    );
    Ok(engines)
}
