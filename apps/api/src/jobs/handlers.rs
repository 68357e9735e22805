//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::applicants::store::list_for_job;
use crate::errors::AppError;
use crate::jobs::store::{create_job, get_job, list_jobs};
use crate::models::applicant::ApplicantRow;
use crate::models::job::JobRow;
use crate::screening::{AtsStatus, QualityLabel};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub job: JobRow,
    /// Ordered by match score, highest first.
    pub applicants: Vec<ApplicantRow>,
    pub shortlisted: usize,
    pub rejected: usize,
    pub high_quality: usize,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(list_jobs(&state.db).await?))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("description cannot be empty".to_string()));
    }

    let job = create_job(&state.db, title, &request.description).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    Ok(Json(get_job(&state.db, job_id).await?))
}

/// GET /api/v1/jobs/:job_id/dashboard
///
/// The job with every applicant ranked by match score.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, AppError> {
    let job = get_job(&state.db, job_id).await?;
    let applicants = list_for_job(&state.db, job_id).await?;

    let shortlisted = applicants
        .iter()
        .filter(|a| AtsStatus::parse(&a.ats_status) == Some(AtsStatus::Shortlisted))
        .count();
    let rejected = applicants.len() - shortlisted;
    let high_quality = applicants
        .iter()
        .filter(|a| QualityLabel::parse(&a.resume_quality) == Some(QualityLabel::High))
        .count();

    Ok(Json(DashboardResponse {
        job,
        applicants,
        shortlisted,
        rejected,
        high_quality,
    }))
}
