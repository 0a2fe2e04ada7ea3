//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Liveness ("Backend working fine!")
//! GET  /health/ready   - Database readiness
//! POST /api/leads      - Submit a lead
//! ```

pub mod health;
pub mod leads;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health/ready", get(health::readiness))
        .route("/api/leads", post(leads::create))
}

/// Build the application router with its middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn router(state: AppState) -> Router {
    routes()
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use lead_intake_core::{LeadId, Recipients};
    use tower::ServiceExt;

    use super::*;
    use crate::db::{MockLeadStore, StoreError};
    use crate::services::LeadIntake;
    use crate::services::notify::{MockNotifier, NotifyError};

    const JANE: &str = r#"{"name":"Jane","email":"jane@x.com","phone":"5551234","message":"Interested","enquiryFor":"Custom Tour"}"#;

    fn make_state(store: MockLeadStore, notifier: MockNotifier) -> AppState {
        AppState::new(LeadIntake::new(
            Arc::new(store),
            Arc::new(notifier),
            Recipients::parse("sales@example.com").unwrap(),
        ))
    }

    fn untouched() -> (MockLeadStore, MockNotifier) {
        let mut store = MockLeadStore::new();
        store.expect_insert().never();
        store.expect_ping().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();
        (store, notifier)
    }

    async fn post_lead(state: AppState, body: &str) -> axum::response::Response {
        let req = Request::builder()
            .method("POST")
            .uri("/api/leads")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        router(state).oneshot(req).await.unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ── GET / ───────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn root_returns_200_without_touching_collaborators() {
        let (store, notifier) = untouched();
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let resp = router(make_state(store, notifier)).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Backend working fine!");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (store, notifier) = untouched();
        let req = Request::builder()
            .uri("/")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let resp = router(make_state(store, notifier)).oneshot(req).await.unwrap();

        assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");
    }

    // ── GET /health/ready ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn readiness_ok_when_store_answers() {
        let mut store = MockLeadStore::new();
        store.expect_ping().once().return_once(|| Ok(()));
        store.expect_insert().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();

        let req = Request::builder()
            .uri("/health/ready")
            .body(Body::empty())
            .unwrap();
        let resp = router(make_state(store, notifier)).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let request_id = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(request_id).is_ok());
    }

    #[tokio::test]
    async fn readiness_reports_store_outage() {
        let mut store = MockLeadStore::new();
        store
            .expect_ping()
            .once()
            .return_once(|| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));
        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();

        let req = Request::builder()
            .uri("/health/ready")
            .body(Body::empty())
            .unwrap();
        let resp = router(make_state(store, notifier)).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    // ── POST /api/leads ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_returns_id_and_confirmation() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert()
            .once()
            .withf(|lead| {
                lead.enquiry_for.as_deref() == Some("Custom Tour")
                    && lead.phone.as_deref() == Some("5551234")
            })
            .return_once(|_| Ok(LeadId::new(41)));
        let mut notifier = MockNotifier::new();
        notifier.expect_send().once().return_once(|_| Ok(()));

        let resp = post_lead(make_state(store, notifier), JANE).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["id"], 41);
        assert_eq!(body["message"], "Lead saved successfully!");
    }

    #[tokio::test]
    async fn create_succeeds_when_notifier_is_unreachable() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert()
            .once()
            .return_once(|_| Ok(LeadId::new(42)));
        let mut notifier = MockNotifier::new();
        notifier.expect_send().once().return_once(|_| {
            Err(NotifyError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            })
        });

        let resp = post_lead(make_state(store, notifier), JANE).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["id"], 42);
        assert_eq!(body["message"], "Lead saved successfully!");
    }

    #[tokio::test]
    async fn create_returns_500_and_sends_nothing_when_store_fails() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert()
            .once()
            .return_once(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));
        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();

        let resp = post_lead(make_state(store, notifier), JANE).await;

        assert!(resp.status().is_server_error());
        let body = json_body(resp).await;
        assert_eq!(body["error"], sqlx::Error::PoolTimedOut.to_string().as_str());
        assert!(body.get("success").is_none());
    }

    #[tokio::test]
    async fn create_forwards_missing_fields_to_store() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert()
            .once()
            .withf(|lead| lead.name.is_none() && lead.email.as_deref() == Some("x"))
            .return_once(|_| Err(StoreError::Database(sqlx::Error::RowNotFound)));
        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();

        let resp = post_lead(make_state(store, notifier), r#"{"email":"x"}"#).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn create_rejects_numeric_field_without_storing() {
        let (store, notifier) = untouched();

        let resp = post_lead(
            make_state(store, notifier),
            r#"{"name":"Jane","email":"jane@x.com","phone":5551234}"#,
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(resp).await;
        assert!(body["error"].as_str().unwrap().contains("phone"));
    }

    #[tokio::test]
    async fn create_rejects_malformed_json_with_error_body() {
        let (store, notifier) = untouched();

        let resp = post_lead(make_state(store, notifier), "{not json").await;

        assert!(resp.status().is_client_error());
        let body = json_body(resp).await;
        assert!(body["error"].is_string());
    }
}
