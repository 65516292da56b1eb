//! Verification handler

use axum::extract::State;
use axum::Json;
use fpbridge_core::Command;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Response for fingerprint verification
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    /// Whatever the device replied. The field name is part of the wire
    /// contract; the content is not parsed or validated as an identifier.
    pub student_id: String,
}

/// GET /verify
/// Ask the device to match the current fingerprint against its database
pub async fn verify(State(state): State<AppState>) -> Result<Json<VerifyResponse>, ApiError> {
    let reply = state.link().send_command(&Command::Verify).await?;

    Ok(Json(VerifyResponse {
        status: "ok",
        student_id: reply,
    }))
}
