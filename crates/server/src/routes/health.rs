//! Liveness and readiness endpoints.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Body returned by `GET /`.
pub const LIVENESS_MESSAGE: &str = "Backend working fine!";

/// Liveness check.
///
/// Never touches the store or the notifier.
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
