//! Install date submission route handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use raving_residents_core::{InstallDateSelection, ResidentId};

use crate::error::{AppError, JsonError};
use crate::middleware::SessionResident;
use crate::services::send_install_dates as dispatch_install_dates;
use crate::state::AppState;

/// Install date submission body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInstallDatesRequest {
    pub install_dates: Vec<InstallDateSelection>,
}

/// Successful submission response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInstallDatesResponse {
    pub success: bool,
    pub message_id: String,
}

/// Email the resident's proposed install dates to the scheduling team.
///
/// POST /api/send-install-dates
///
/// The resident comes from the session established by a dashboard visit,
/// never from the body or the query string. Each call sends a new email.
#[instrument(skip(state, payload))]
pub async fn send_install_dates(
    State(state): State<AppState>,
    session_resident: SessionResident,
    payload: Result<Json<SendInstallDatesRequest>, JsonRejection>,
) -> Result<Json<SendInstallDatesResponse>, JsonError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let resident_id = ResidentId::parse(&session_resident.raw_id)?;
    let resident = state.residents().lookup_resident(&resident_id).await?;

    let message_id = dispatch_install_dates(
        state.mailer(),
        &resident_id,
        &resident,
        &request.install_dates,
    )
    .await?;

    Ok(Json(SendInstallDatesResponse {
        success: true,
        message_id,
    }))
}
