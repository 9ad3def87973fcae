//! # genai-cli
//!
//! Command-line interface for managing permissions on corpora and tuned
//! models.
//!
//! - `genai permission create/get/list` — grant and inspect access
//! - `genai permission update/delete` — change a grant's role or remove it
//! - `genai permission transfer` — hand a tuned model to a new owner
//!
//! Runs against the local file-backed permission store.

mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use genai_permission::ClientConfig;
use tracing_subscriber::EnvFilter;

/// Manage permissions on corpora and tuned models.
#[derive(Parser)]
#[command(name = "genai", version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/genai/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Permission store file (overrides [local] store_path).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Per-call timeout in seconds (overrides [request] timeout_secs).
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, inspect, and change permissions.
    Permission {
        #[command(subcommand)]
        command: commands::permission::PermissionCommands,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.local.store_path = store;
    }
    if let Some(timeout) = cli.timeout {
        config.request.timeout_secs = Some(timeout);
    }

    match &cli.command {
        Commands::Permission { command } => commands::permission::execute(command, &config),
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("genai_permission={}", level).parse()?)
                .add_directive(format!("genai_service_local={}", level).parse()?)
                .add_directive(format!("genai_cli={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}

/// Explicit `--config` must exist; the default location is optional.
fn load_config(path: Option<&Path>) -> anyhow::Result<ClientConfig> {
    match path {
        Some(path) => Ok(ClientConfig::load(path)?),
        None => match ClientConfig::default_path() {
            Some(default) => Ok(ClientConfig::load_or_default(&default)?),
            None => Ok(ClientConfig::default()),
        },
    }
}
