//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::LeadStore;
use crate::services::LeadIntake;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It is built once in `main`
/// from the explicitly created pool and never rebuilt per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    intake: LeadIntake,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(intake: LeadIntake) -> Self {
        Self {
            inner: Arc::new(AppStateInner { intake }),
        }
    }

    /// Get a reference to the lead intake service.
    #[must_use]
    pub fn intake(&self) -> &LeadIntake {
        &self.inner.intake
    }

    /// Get a reference to the lead store.
    #[must_use]
    pub fn store(&self) -> &dyn LeadStore {
        self.inner.intake.store()
    }
}
