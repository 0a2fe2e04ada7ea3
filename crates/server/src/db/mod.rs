//! Database access for the `leads` table.
//!
//! # Tables
//!
//! - `leads` - One row per contact-form submission, id assigned by `SERIAL`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p lead-intake-cli -- db migrate
//! ```

pub mod leads;

use std::time::Duration;

use async_trait::async_trait;
use lead_intake_core::{LeadId, NewLead};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use leads::PgLeadStore;

/// Name of the table holding leads.
pub const LEADS_TABLE: &str = "leads";

/// A store operation failed.
///
/// The display text is the driver's own message; it is returned verbatim to
/// HTTP clients when an insert fails.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Migration could not be applied.
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Persistence seam for leads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Insert one lead and return the identifier the store assigned.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the row could not be written (unreachable
    /// database, NOT NULL violation, timeout).
    async fn insert(&self, lead: &NewLead) -> Result<LeadId, StoreError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a trivial query fails.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool.
///
/// The pool is bounded by `config.max_connections`; connections are handed
/// back on completion of each query, including on error.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(config.url.expose_secret())
        .await
}

/// Apply all pending migrations from `crates/server/migrations/`.
///
/// # Errors
///
/// Returns `StoreError::Migration` if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// List the columns of `table` in the current schema, in declaration order.
///
/// An empty list means the table does not exist.
///
/// # Errors
///
/// Returns `StoreError::Database` if the catalog query fails.
pub async fn table_columns(pool: &PgPool, table: &str) -> Result<Vec<String>, StoreError> {
    let columns = sqlx::query_scalar::<_, String>(
        r"
        SELECT column_name::text
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name = $1
        ORDER BY ordinal_position
        ",
    )
    .bind(table)
    .fetch_all(pool)
    .await?;

    Ok(columns)
}
