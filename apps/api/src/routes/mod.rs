pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applicants::handlers as applicants;
use crate::documents::handlers as documents;
use crate::jobs::handlers as jobs;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/:job_id", get(jobs::handle_get_job))
        .route("/api/v1/jobs/:job_id/dashboard", get(jobs::handle_dashboard))
        // Applications API
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(applicants::handle_apply).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/v1/jobs/:job_id/rescreen",
            post(applicants::handle_rescreen),
        )
        // Screening preview
        .route("/api/v1/screen", post(screening::handle_screen_preview))
        // Stored resumes
        .route("/uploads/*key", get(documents::handle_get_document))
        .with_state(state)
}
