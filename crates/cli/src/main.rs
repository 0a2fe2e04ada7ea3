//! Lead Intake CLI - Database setup and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the leads table
//! lead-cli db migrate
//!
//! # Check that the leads table exists and list its columns
//! lead-cli db check
//!
//! # Test database connectivity
//! lead-cli db ping
//!
//! # Show a stored lead
//! lead-cli leads show 42
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lead-cli")]
#[command(author, version, about = "Lead intake CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the leads database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
    /// Inspect stored leads
    Leads {
        #[command(subcommand)]
        action: LeadsAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Create the leads table
    Migrate,
    /// Report whether the leads table exists and list its columns
    Check,
    /// Test database connectivity
    Ping,
}

#[derive(Subcommand)]
enum LeadsAction {
    /// Show a lead by id
    Show {
        /// Lead id
        id: i32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Db { action } => match action {
            DbAction::Migrate => commands::db::migrate().await?,
            DbAction::Check => commands::db::check().await?,
            DbAction::Ping => commands::db::ping().await?,
        },
        Commands::Leads { action } => match action {
            LeadsAction::Show { id } => commands::leads::show(id).await?,
        },
    }
    Ok(())
}
