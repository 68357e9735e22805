use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::applicant::ApplicantRow;
use crate::screening::ScoringResult;

/// Parameters for persisting one screened application.
pub struct NewApplicant<'a> {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: &'a str,
    pub document_key: &'a str,
    pub result: &'a ScoringResult,
}

pub async fn save_applicant(pool: &PgPool, params: NewApplicant<'_>) -> Result<ApplicantRow, AppError> {
    let NewApplicant {
        id,
        job_id,
        name,
        document_key,
        result,
    } = params;

    let row = sqlx::query_as::<_, ApplicantRow>(
        r#"
        INSERT INTO applicants
            (id, job_id, name, document_key, match_score, missing_keywords,
             ats_status, resume_quality)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(job_id)
    .bind(name)
    .bind(document_key)
    .bind(result.score())
    .bind(result.missing_keywords())
    .bind(result.status().as_str())
    .bind(result.quality().as_str())
    .fetch_one(pool)
    .await?;

    info!(
        "Saved applicant {} for job {}: {} ({})",
        id,
        job_id,
        result.score(),
        result.status().as_str()
    );
    Ok(row)
}

/// Overwrites the screening outcome of an existing application.
pub async fn update_result(
    pool: &PgPool,
    applicant_id: Uuid,
    result: &ScoringResult,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE applicants
        SET match_score = $1, missing_keywords = $2, ats_status = $3, resume_quality = $4
        WHERE id = $5
        "#,
    )
    .bind(result.score())
    .bind(result.missing_keywords())
    .bind(result.status().as_str())
    .bind(result.quality().as_str())
    .bind(applicant_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns every applicant for a job, highest match score first.
pub async fn list_for_job(pool: &PgPool, job_id: Uuid) -> Result<Vec<ApplicantRow>, AppError> {
    Ok(sqlx::query_as::<_, ApplicantRow>(
        "SELECT * FROM applicants WHERE job_id = $1 ORDER BY match_score DESC, created_at ASC",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?)
}
