//! Enrollment handler

use axum::extract::State;
use axum::Json;
use fpbridge_core::Command;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Request for fingerprint enrollment
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// Student id to enroll the fingerprint under
    #[serde(default)]
    pub student_id: Option<String>,
}

/// Response for fingerprint enrollment
#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub status: &'static str,
    /// The device's raw reply line ("" if it sent nothing in time)
    pub message: String,
}

/// POST /enroll
/// Forward an enroll command to the device and relay its reply.
///
/// The body is optional: a request without one is treated the same as a
/// request whose `student_id` is absent or empty.
pub async fn enroll(
    State(state): State<AppState>,
    request: Option<Json<EnrollRequest>>,
) -> Result<Json<EnrollResponse>, ApiError> {
    let student_id = request
        .and_then(|Json(req)| req.student_id)
        .filter(|id| !id.is_empty());
    let Some(student_id) = student_id else {
        return Err(ApiError::BadRequest("Missing student_id".to_string()));
    };

    tracing::info!(%student_id, "enrollment requested");
    let reply = state
        .link()
        .send_command(&Command::Enroll(student_id))
        .await?;

    Ok(Json(EnrollResponse {
        status: "ok",
        message: reply,
    }))
}
