//! Incident notification trigger endpoint

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;
use vwp_common::IncidentEvent;

use crate::error::{ApiError, ApiResult};
use crate::{notify, AppState};

/// Response body for an accepted dispatch
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub status: String,
}

/// POST /notify/incident
///
/// Accepts an incident snapshot from the incident service and detaches
/// rule evaluation and delivery onto a background task. Replies 202 before
/// any delivery work happens, so incident creation never waits on (or
/// observes) notification outcomes.
pub async fn accept_incident(
    State(state): State<AppState>,
    Json(incident): Json<IncidentEvent>,
) -> ApiResult<(StatusCode, Json<AcceptedResponse>)> {
    if incident.id <= 0 {
        return Err(ApiError::BadRequest(
            "incident id must be positive".to_string(),
        ));
    }

    info!(
        incident_id = incident.id,
        code = %incident.incident_code,
        severity = %incident.severity,
        "Accepted incident for notification dispatch"
    );

    tokio::spawn(async move {
        notify::notify_incident(&state, &incident).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(AcceptedResponse {
            status: "accepted".to_string(),
        }),
    ))
}
