use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRow;

/// Inserts a new job posting and returns the stored row.
pub async fn create_job(pool: &PgPool, title: &str, description: &str) -> Result<JobRow, AppError> {
    let job = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (id, title, description)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await?;

    info!("Created job {} ({})", job.id, job.title);
    Ok(job)
}

/// Returns all jobs, newest first.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, AppError> {
    Ok(
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// Returns the description text the engine screens against.
pub async fn get_description(pool: &PgPool, job_id: Uuid) -> Result<String, AppError> {
    let description: Option<String> =
        sqlx::query_scalar("SELECT description FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(pool)
            .await?;
    description.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}
