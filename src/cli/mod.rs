//! # Command Line Interface
//!
//! `secretctl` reads secrets from a JSON snapshot through the [`Store`]
//! contract.

pub mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::Instrument;

use crate::config::StoreConfig;
use crate::observability::{init_logging, log_config_info};
use crate::secrets::{JsonStore, SecretId, Store, SNAPSHOT_VERSION};
use crate::store_span;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "secretctl")]
#[command(about = "Read secrets from a JSON snapshot store")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Snapshot file (overrides SECRET_STORE_SNAPSHOT_PATH)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one secret value
    Read {
        service: String,
        key: String,

        /// Requested version (snapshot stores always serve version 1)
        #[arg(long, default_value_t = SNAPSHOT_VERSION)]
        version: u64,
    },

    /// List the secrets of a service
    List {
        service: String,

        /// Include secret values in the output
        #[arg(long)]
        values: bool,
    },

    /// Show the change history of a secret
    History { service: String, key: String },

    /// List loaded services
    Services,
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = StoreConfig::from_env()?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(file) = &cli.file {
        config = config.with_snapshot_path(file);
    }

    init_logging(&config.logging);
    log_config_info(&config);

    let store = config.open_store().context("Failed to open secrets snapshot")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(&store, cli.command, cli.output, &mut out).await
}

/// Execute a single command against a loaded store
pub async fn run_command(
    store: &JsonStore,
    command: Commands,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Read { service, key, version } => {
            let span = store_span!("read", service, key = %key);
            let id = SecretId::new(service, key);
            let secret = store.read(&id, version).instrument(span).await?;
            output::write_secret(out, &secret, format)
        }
        Commands::List { service, values } => {
            let span = store_span!("list", service, include_values = values);
            let secrets = store.list(&service, values).instrument(span).await?;
            output::write_secrets(out, &secrets, format)
        }
        Commands::History { service, key } => {
            let span = store_span!("history", service, key = %key);
            let events = store.history(&SecretId::new(service, key)).instrument(span).await?;
            output::write_history(out, &events, format)
        }
        Commands::Services => output::write_names(out, &store.services(), format),
    }
}
