//! Database maintenance commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the leads table (applies crates/server/migrations/)
//! lead-cli db migrate
//!
//! # Report whether the leads table exists and list its columns
//! lead-cli db check
//!
//! # Verify the database is reachable
//! lead-cli db ping
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use lead_intake_server::db::{self, LEADS_TABLE, LeadStore, PgLeadStore};

use super::{CommandError, connect};

/// Run pending migrations.
///
/// # Errors
///
/// Returns error if the database is unreachable or a migration fails.
pub async fn migrate() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;
    tracing::info!("Table '{LEADS_TABLE}' created successfully or already exists");

    pool.close().await;
    Ok(())
}

/// Report whether the leads table exists.
///
/// # Errors
///
/// Returns error if the catalog query fails.
pub async fn check() -> Result<(), CommandError> {
    let pool = connect().await?;

    let columns = db::table_columns(&pool, LEADS_TABLE).await?;
    if columns.is_empty() {
        tracing::warn!("Table '{LEADS_TABLE}' does not exist");
    } else {
        tracing::info!(columns = %columns.join(", "), "Table '{LEADS_TABLE}' exists");
    }

    pool.close().await;
    Ok(())
}

/// Check connectivity with a trivial query.
///
/// # Errors
///
/// Returns error if the database cannot be reached.
pub async fn ping() -> Result<(), CommandError> {
    let pool = connect().await?;

    PgLeadStore::new(pool.clone()).ping().await?;
    tracing::info!("Successfully connected to database");

    pool.close().await;
    Ok(())
}
