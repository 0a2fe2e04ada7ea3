//! Unified error handling with Sentry integration.
//!
//! Every failure a handler returns is rendered as `{"error": "<message>"}`.
//! Store failures are captured to Sentry before responding and their message
//! is passed through to the client unchanged.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The lead could not be stored.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request body was not acceptable JSON.
    #[error(transparent)]
    Json(#[from] JsonRejection),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Store(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Json(rejection) => rejection.status(),
        };

        let body = ErrorBody {
            error: match &self {
                Self::Store(err) => err.to_string(),
                Self::Json(rejection) => rejection.body_text(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_error_is_500_with_raw_message() {
        let err = AppError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));
        let expected = sqlx::Error::PoolTimedOut.to_string();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], expected.as_str());
    }

    #[test]
    fn test_store_error_display_is_transparent() {
        let err = AppError::Store(StoreError::Database(sqlx::Error::RowNotFound));
        assert_eq!(err.to_string(), sqlx::Error::RowNotFound.to_string());
    }
}
