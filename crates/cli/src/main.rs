//! Debounce CLI - dbx command

use anyhow::Result;
use clap::{Parser, Subcommand};
use dbx_lib::cmd;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// dbx - exercise and configure the lock-free debouncer
#[derive(Parser)]
#[command(name = "dbx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/debounce/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference timeline (interleaved calls, burst, follow-up)
    Simulate {
        /// Override the configured interval
        #[arg(long)]
        interval_ms: Option<i64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Call one action from many threads at once
    Race {
        /// Number of concurrent callers
        #[arg(short, long, default_value = "32")]
        threads: usize,
        /// Override the configured interval
        #[arg(long)]
        interval_ms: Option<i64>,
    },
    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the config file path
    Path {
        /// Write a default config if none exists
        #[arg(long)]
        create: bool,
    },
    /// Show the effective configuration
    Show,
    /// Print an example configuration
    Example,
    /// Validate a config file
    Check {
        /// File to validate
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Commands::Simulate { interval_ms, json } => {
            cmd::simulate::run(config_path.as_deref(), interval_ms, json)
        }
        Commands::Race { threads, interval_ms } => {
            cmd::race::run(config_path.as_deref(), interval_ms, threads)
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Path { create } => cmd::config::run_path(config_path.as_deref(), create),
            ConfigCommands::Show => cmd::config::run_show(config_path.as_deref()),
            ConfigCommands::Example => cmd::config::run_example(),
            ConfigCommands::Check { file } => cmd::config::run_check(&file),
        },
    }
}
