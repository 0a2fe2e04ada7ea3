//! Lead intake: store first, then notify.
//!
//! A submission is a two-phase operation. The insert is authoritative: if it
//! fails nothing else happens and the error is returned. Once the row exists,
//! a failed notification is logged and reported in [`SubmitOutcome::notified`]
//! but never undoes or fails the submission.

use std::sync::Arc;

use lead_intake_core::{LeadId, NewLead, Recipients};

use crate::db::{LeadStore, StoreError};
use crate::services::notify::{Notification, Notifier, NotifyError};

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Identifier assigned by the store.
    pub id: LeadId,
    /// Whether the staff notification was delivered.
    pub notified: bool,
}

/// Orchestrates the store and notifier for each submission.
#[derive(Clone)]
pub struct LeadIntake {
    store: Arc<dyn LeadStore>,
    notifier: Arc<dyn Notifier>,
    recipients: Recipients,
}

impl LeadIntake {
    /// Create a new intake service.
    #[must_use]
    pub fn new(
        store: Arc<dyn LeadStore>,
        notifier: Arc<dyn Notifier>,
        recipients: Recipients,
    ) -> Self {
        Self {
            store,
            notifier,
            recipients,
        }
    }

    /// The persistence collaborator.
    #[must_use]
    pub fn store(&self) -> &dyn LeadStore {
        self.store.as_ref()
    }

    /// Record a lead and notify staff.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails. Notification failures are
    /// not errors.
    pub async fn submit(&self, lead: &NewLead) -> Result<SubmitOutcome, StoreError> {
        let id = self.store.insert(lead).await?;
        tracing::info!(lead_id = %id, "Lead stored");

        let notified = match self.notify(id, lead).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(lead_id = %id, error = %e, "Lead notification failed");
                false
            }
        };

        Ok(SubmitOutcome { id, notified })
    }

    async fn notify(&self, id: LeadId, lead: &NewLead) -> Result<(), NotifyError> {
        let notification = Notification::new_lead(id, lead, &self.recipients)?;
        self.notifier.send(&notification).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MockLeadStore;
    use crate::services::notify::MockNotifier;

    fn recipients() -> Recipients {
        Recipients::parse("sales@example.com").unwrap()
    }

    fn jane() -> NewLead {
        NewLead {
            name: Some("Jane".to_string()),
            email: Some("jane@x.com".to_string()),
            phone: Some("5551234".to_string()),
            message: Some("Interested".to_string()),
            enquiry_for: Some("Custom Tour".to_string()),
        }
    }

    fn intake(store: MockLeadStore, notifier: MockNotifier) -> LeadIntake {
        LeadIntake::new(Arc::new(store), Arc::new(notifier), recipients())
    }

    #[tokio::test]
    async fn test_submit_stores_then_notifies() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert()
            .once()
            .withf(|lead| lead.name.as_deref() == Some("Jane"))
            .return_once(|_| Ok(LeadId::new(7)));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .once()
            .withf(|n| n.subject == "New Lead Received" && n.html_body.contains("Custom Tour"))
            .return_once(|_| Ok(()));

        let outcome = intake(store, notifier).submit(&jane()).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome {
                id: LeadId::new(7),
                notified: true
            }
        );
    }

    #[tokio::test]
    async fn test_store_failure_skips_notification() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert()
            .once()
            .return_once(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();

        let err = intake(store, notifier).submit(&jane()).await.unwrap_err();

        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolTimedOut)));
    }

    #[tokio::test]
    async fn test_notification_failure_keeps_submission() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert()
            .once()
            .return_once(|_| Ok(LeadId::new(8)));

        let mut notifier = MockNotifier::new();
        notifier.expect_send().once().return_once(|_| {
            Err(NotifyError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        });

        let outcome = intake(store, notifier).submit(&jane()).await.unwrap();

        assert_eq!(outcome.id, LeadId::new(8));
        assert!(!outcome.notified);
    }

    #[tokio::test]
    async fn test_notification_addressed_to_configured_recipients() {
        let mut store = MockLeadStore::new();
        store.expect_insert().return_once(|_| Ok(LeadId::new(1)));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .once()
            .withf(|n| n.recipients.to_string() == "a@example.com, b@example.com")
            .return_once(|_| Ok(()));

        let intake = LeadIntake::new(
            Arc::new(store),
            Arc::new(notifier),
            Recipients::parse("a@example.com,b@example.com").unwrap(),
        );

        assert!(intake.submit(&jane()).await.unwrap().notified);
    }
}
