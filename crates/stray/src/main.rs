//! Stray CLI - orphaned-file auditor for Antora-style documentation trees.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "stray")]
#[command(about = "Find documentation files nothing references")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to stray.toml config file
    #[arg(short, long, default_value = "stray.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit every component/version for orphaned files
    Audit(commands::audit::AuditArgs),

    /// List components and the size of their catalogs
    List {
        /// Content root (defaults to the configured site root)
        root: Option<PathBuf>,
    },

    /// Print every canonical reference found in scannable sources
    Refs {
        /// Content root (defaults to the configured site root)
        root: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging; the report itself goes to stdout, logs to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Audit(args) => commands::audit::run(args, &cli.config),
        Commands::List { root } => {
            commands::list::run(root, &cli.config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Refs { root } => {
            commands::refs::run(root, &cli.config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
