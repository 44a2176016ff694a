//! EODly CLI - End-of-day report journal
//!
//! A command-line interface for composing daily shift reports, browsing and
//! trashing them, and exporting CSV/HTML digests.

mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eodly")]
#[command(author, version, about = "End-of-day report journal CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Override data directory (or set EODLY_DATA_DIR env var)
    #[arg(long, env = "EODLY_DATA_DIR", global = true)]
    data_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign up, and session management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },

    /// Compose and browse reports
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },

    /// Manage the trash bin
    Trash {
        #[command(subcommand)]
        action: commands::trash::TrashAction,
    },

    /// Export submitted reports (CSV, printable bundle, team summary)
    Export {
        #[command(subcommand)]
        action: commands::export::ExportAction,
    },

    /// Activity statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },

    /// Profile and preferences
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Set up data directory if provided
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(eodly_core::DATA_DIR_ENV, data_dir);
    }

    // Open the store backing all state
    let store = Arc::new(eodly_core::JsonFileStore::open_default()?);

    // Create context for commands
    let ctx = commands::Context {
        store,
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Auth { action } => commands::auth::execute(&ctx, action).await,
        Commands::Report { action } => commands::report::execute(&ctx, action).await,
        Commands::Trash { action } => commands::trash::execute(&ctx, action).await,
        Commands::Export { action } => commands::export::execute(&ctx, action).await,
        Commands::Stats { action } => commands::stats::execute(&ctx, action).await,
        Commands::Profile { action } => commands::profile::execute(&ctx, action).await,
    }
}
