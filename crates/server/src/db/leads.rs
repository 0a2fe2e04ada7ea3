//! Lead repository backed by `PostgreSQL`.
//!
//! Queries are runtime-checked so the crate builds without a live database.

use async_trait::async_trait;
use lead_intake_core::{Lead, LeadId, NewLead};
use sqlx::PgPool;

use super::{LeadStore, StoreError};

/// `PostgreSQL` implementation of [`LeadStore`].
///
/// Holds a clone of the process-wide pool; cloning is cheap and every clone
/// shares the same bounded set of connections.
#[derive(Debug, Clone)]
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    /// Create a new lead store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetch a lead by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    pub async fn find_by_id(&self, id: LeadId) -> Result<Option<Lead>, StoreError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            SELECT id, name, email, phone, message,
                   "enquiryFor" AS enquiry_for,
                   created_at
            FROM leads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    #[tracing::instrument(name = "Insert lead", skip_all)]
    async fn insert(&self, lead: &NewLead) -> Result<LeadId, StoreError> {
        let id = sqlx::query_scalar::<_, LeadId>(
            r#"
            INSERT INTO leads (name, email, phone, message, "enquiryFor")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(lead.name.as_deref())
        .bind(lead.email.as_deref())
        .bind(lead.phone.as_deref())
        .bind(lead.message.as_deref())
        .bind(lead.enquiry_for.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
