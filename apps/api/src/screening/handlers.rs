//! Axum route handler for stateless screening previews.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::screening::engine::ScoringResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScreenPreviewRequest {
    pub job_description: String,
    pub resume_text: String,
}

/// POST /api/v1/screen
///
/// Scores resume text against a job description without storing anything.
pub async fn handle_screen_preview(
    State(state): State<AppState>,
    Json(request): Json<ScreenPreviewRequest>,
) -> Result<Json<ScoringResult>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let result = state
        .engine
        .screen_text_blocking(request.job_description, request.resume_text)
        .await?;

    Ok(Json(result))
}
