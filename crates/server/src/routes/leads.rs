//! Lead submission handler.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use lead_intake_core::{LeadId, NewLead};
use serde::Serialize;
use tracing::{Span, instrument};

use crate::error::Result;
use crate::state::AppState;

/// Confirmation returned for every stored lead, whether or not the
/// notification went out.
pub const LEAD_SAVED_MESSAGE: &str = "Lead saved successfully!";

/// Response for a stored lead.
#[derive(Debug, Serialize)]
pub struct LeadCreated {
    pub success: bool,
    pub id: LeadId,
    pub message: String,
}

/// Submit a lead.
///
/// POST /api/leads
///
/// Fields are forwarded as-is; the table's NOT NULL constraints are the only
/// enforcement, and a violation surfaces as a 500 with the database message.
#[instrument(skip_all, fields(lead_id, notified))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewLead>, JsonRejection>,
) -> Result<Json<LeadCreated>> {
    let Json(lead) = payload?;

    let outcome = state.intake().submit(&lead).await?;

    let span = Span::current();
    span.record("lead_id", outcome.id.as_i32());
    span.record("notified", outcome.notified);

    Ok(Json(LeadCreated {
        success: true,
        id: outcome.id,
        message: LEAD_SAVED_MESSAGE.to_string(),
    }))
}
