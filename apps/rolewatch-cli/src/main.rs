//! rolewatch CLI - Privileged-access posture auditor
//!
//! This CLI enables operators to:
//! - Run a full multi-tenant audit (`rolewatch run`)
//! - Compare two stored snapshots (`rolewatch diff`)
//! - List stored snapshots (`rolewatch history`)

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;
mod logging;

use error::CliResult;

/// rolewatch - privileged-access posture auditing
#[derive(Parser)]
#[command(name = "rolewatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a full audit run across all configured tenants
    Run(commands::run::RunArgs),

    /// Compare two stored snapshots by capture date
    Diff(commands::diff::DiffArgs),

    /// List stored snapshots
    History(commands::history::HistoryArgs),
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Run(args) => commands::run::execute(args).await,
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::History(args) => commands::history::execute(args),
    }
}
