//! CLI command implementations.

pub mod db;
pub mod leads;

use lead_intake_server::config::{ConfigError, DatabaseConfig};
use lead_intake_server::db::{StoreError, create_pool};
use sqlx::PgPool;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Lead {0} not found")]
    LeadNotFound(i32),
}

/// Load database settings from the environment and connect.
async fn connect() -> Result<PgPool, CommandError> {
    let config = DatabaseConfig::from_env()?;
    let pool = create_pool(&config).await?;
    Ok(pool)
}
