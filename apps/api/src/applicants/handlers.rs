//! Axum route handlers for the Applications API.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::applicants::store::{list_for_job, save_applicant, update_result, NewApplicant};
use crate::documents::{document_key, secure_filename, DocumentRepository};
use crate::errors::AppError;
use crate::jobs::store::get_description;
use crate::models::applicant::ApplicantRow;
use crate::screening::extractor::file_extension;
use crate::screening::{AtsStatus, BatchDocument, QualityLabel, ScoringResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub applicant_id: Uuid,
    pub document_key: String,
    pub score: f64,
    pub missing_keywords: Vec<String>,
    pub quality: QualityLabel,
    pub quality_description: &'static str,
    pub status: AtsStatus,
}

#[derive(Debug, Serialize)]
pub struct RescreenResponse {
    pub job_id: Uuid,
    pub rescreened: usize,
    pub changed: usize,
    pub failed: usize,
}

/// Fields collected from the multipart application form.
struct ApplicationForm {
    name: String,
    filename: String,
    bytes: Bytes,
}

async fn read_application_form(mut multipart: Multipart) -> Result<ApplicationForm, AppError> {
    let mut name = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid name field: {e}")))?;
                name = Some(value);
            }
            Some("resume") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
                file = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("name is required".to_string()))?;
    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("resume file has no filename".to_string()));
    }

    Ok(ApplicationForm {
        name,
        filename,
        bytes,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:job_id/applications
///
/// Multipart form: `name` + `resume` file.
/// Flow: validate → screen → store document under a unique key → persist.
/// If the insert fails the stored document is removed again.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    let form = read_application_form(multipart).await?;

    let extension = file_extension(&form.filename).unwrap_or_default();
    if !state.config.is_allowed_extension(&extension) {
        return Err(AppError::UnsupportedMediaType(format!(
            "'{}' is not an accepted resume format (allowed: {})",
            form.filename,
            state.config.allowed_extensions.join(", ")
        )));
    }
    let safe_name = usable_filename(&form.filename, &extension)
        .ok_or_else(|| AppError::Validation("resume filename is not usable".to_string()))?;

    // Resolve the job before touching storage so unknown ids leave nothing behind.
    let job_description = get_description(&state.db, job_id).await?;

    let result = state
        .engine
        .screen_document_blocking(job_description, form.bytes.clone(), safe_name.clone())
        .await?;

    let applicant_id = Uuid::new_v4();
    let key = document_key(job_id, applicant_id, &safe_name);
    store_with_rollback(
        state.documents.as_ref(),
        &key,
        form.bytes,
        save_applicant(
            &state.db,
            NewApplicant {
                id: applicant_id,
                job_id,
                name: &form.name,
                document_key: &key,
                result: &result,
            },
        ),
    )
    .await?;

    info!(
        "Application {} for job {}: score {} → {}",
        applicant_id,
        job_id,
        result.score(),
        result.status().as_str()
    );

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            applicant_id,
            document_key: key,
            score: result.score(),
            missing_keywords: result.missing_keywords().to_vec(),
            quality: result.quality(),
            quality_description: result.quality().description(),
            status: result.status(),
        }),
    ))
}

/// POST /api/v1/jobs/:job_id/rescreen
///
/// Re-scores every stored resume for a job with the current thresholds.
/// Documents that can no longer be fetched are counted as failed and left unchanged.
pub async fn handle_rescreen(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<RescreenResponse>, AppError> {
    let job_description: Arc<str> = Arc::from(get_description(&state.db, job_id).await?);
    let applicants = list_for_job(&state.db, job_id).await?;

    let (documents, fetch_failures) =
        collect_documents(state.documents.as_ref(), &applicants).await;
    let queued = documents.len();
    let results = state.engine.screen_batch(job_description, documents).await;

    for (applicant_id, result) in &results {
        update_result(&state.db, *applicant_id, result).await?;
    }

    let summary = summarize_rescreen(job_id, &applicants, &results, queued, fetch_failures);
    info!(
        "Rescreened {} applicants for job {} ({} changed, {} failed)",
        summary.rescreened, job_id, summary.changed, summary.failed
    );
    Ok(Json(summary))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Sanitized filename that still carries the uploaded extension.
///
/// The extension selects the text extractor and the download content type,
/// so a name that loses it during sanitizing is rejected.
fn usable_filename(filename: &str, extension: &str) -> Option<String> {
    secure_filename(filename).filter(|name| file_extension(name).as_deref() == Some(extension))
}

/// Stores `bytes` under `key`, then awaits `persist`. If persisting fails the
/// document is deleted so no upload outlives its applicant row.
async fn store_with_rollback<T, F>(
    documents: &dyn DocumentRepository,
    key: &str,
    bytes: Bytes,
    persist: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    documents.store(key, bytes).await?;
    match persist.await {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(cleanup) = documents.delete(key).await {
                warn!("Could not remove orphaned document {key}: {cleanup}");
            }
            Err(e)
        }
    }
}

/// Fetches every applicant's stored resume. Returns the queue plus the number
/// of applicants whose document could not be read.
async fn collect_documents(
    documents: &dyn DocumentRepository,
    applicants: &[ApplicantRow],
) -> (Vec<BatchDocument<Uuid>>, usize) {
    let mut queue = Vec::with_capacity(applicants.len());
    let mut failed = 0usize;
    for applicant in applicants {
        match documents.fetch(&applicant.document_key).await {
            Ok(bytes) => queue.push(BatchDocument {
                key: applicant.id,
                filename: applicant.document_key.clone(),
                bytes,
            }),
            Err(e) => {
                warn!("Skipping applicant {} during rescreen: {e}", applicant.id);
                failed += 1;
            }
        }
    }
    (queue, failed)
}

/// True when any persisted field would differ after writing `result`.
fn result_changed(previous: &ApplicantRow, result: &ScoringResult) -> bool {
    previous.match_score != result.score()
        || previous.ats_status != result.status().as_str()
        || previous.resume_quality != result.quality().as_str()
        || previous.missing_keywords.as_slice() != result.missing_keywords()
}

/// `failed` covers both unreadable documents and queued documents whose
/// screening task produced no result.
fn summarize_rescreen(
    job_id: Uuid,
    applicants: &[ApplicantRow],
    results: &[(Uuid, ScoringResult)],
    queued: usize,
    fetch_failures: usize,
) -> RescreenResponse {
    let changed = results
        .iter()
        .filter(|(id, result)| {
            applicants
                .iter()
                .find(|a| a.id == *id)
                .map_or(true, |previous| result_changed(previous, result))
        })
        .count();

    RescreenResponse {
        job_id,
        rescreened: results.len(),
        changed,
        failed: fetch_failures + queued.saturating_sub(results.len()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::documents::LocalDocumentRepository;
    use crate::screening::ScreeningThresholds;

    fn applicant(document_key: &str, result: &ScoringResult) -> ApplicantRow {
        ApplicantRow {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            name: "Ada".to_string(),
            document_key: document_key.to_string(),
            match_score: result.score(),
            missing_keywords: result.missing_keywords().to_vec(),
            ats_status: result.status().as_str().to_string(),
            resume_quality: result.quality().as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    fn result(score: f64, missing: &[&str], quality: QualityLabel) -> ScoringResult {
        ScoringResult::new(
            score,
            missing.iter().map(|k| k.to_string()).collect(),
            quality,
            Vec::new(),
            &ScreeningThresholds::default(),
        )
    }

    #[test]
    fn test_usable_filename_requires_extension_to_survive() {
        assert_eq!(usable_filename("My CV.pdf", "pdf").as_deref(), Some("My_CV.pdf"));
        assert_eq!(usable_filename("日本語.pdf", "pdf"), None);
        assert_eq!(usable_filename("!!.pdf", "pdf"), None);
        assert_eq!(usable_filename("...", ""), None);
    }

    #[test]
    fn test_unchanged_result_is_not_counted() {
        let stored = result(72.5, &["django"], QualityLabel::High);
        let previous = applicant("resumes/j/a-cv.pdf", &stored);
        assert!(!result_changed(&previous, &stored));
    }

    #[test]
    fn test_quality_only_change_is_counted() {
        let stored = result(72.5, &["django"], QualityLabel::High);
        let previous = applicant("resumes/j/a-cv.pdf", &stored);
        let rescored = result(72.5, &["django"], QualityLabel::Medium);
        assert_eq!(rescored.status(), stored.status());
        assert!(result_changed(&previous, &rescored));
    }

    #[test]
    fn test_keyword_only_change_is_counted() {
        let stored = result(72.5, &["django"], QualityLabel::High);
        let previous = applicant("resumes/j/a-cv.pdf", &stored);
        let rescored = result(72.5, &["django", "sql"], QualityLabel::High);
        assert!(result_changed(&previous, &rescored));
    }

    #[test]
    fn test_summary_counts_lost_tasks_as_failed() {
        let job_id = Uuid::new_v4();
        let same = result(80.0, &[], QualityLabel::High);
        let a = applicant("resumes/j/a-cv.pdf", &same);
        let b = applicant("resumes/j/b-cv.pdf", &same);
        let c = applicant("resumes/j/c-cv.pdf", &same);
        let applicants = vec![a.clone(), b.clone(), c];

        // Three queued, one fetch failure beforehand, one task lost in the batch.
        let results = vec![
            (a.id, same.clone()),
            (b.id, result(10.0, &[], QualityLabel::Low)),
        ];
        let summary = summarize_rescreen(job_id, &applicants, &results, 3, 1);
        assert_eq!(summary.job_id, job_id);
        assert_eq!(summary.rescreened, 2);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.failed, 2);
    }

    #[tokio::test]
    async fn test_collect_documents_skips_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());
        repo.store("resumes/j/a-cv.txt", Bytes::from_static(b"Skills: Rust"))
            .await
            .unwrap();

        let scored = result(50.0, &[], QualityLabel::Medium);
        let present = applicant("resumes/j/a-cv.txt", &scored);
        let missing = applicant("resumes/j/gone-cv.pdf", &scored);
        let (queue, failed) = collect_documents(&repo, &[present.clone(), missing]).await;

        assert_eq!(failed, 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].key, present.id);
        assert_eq!(&queue[0].bytes[..], b"Skills: Rust");
    }

    #[tokio::test]
    async fn test_failed_persist_removes_stored_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());
        let key = "resumes/j/a-cv.pdf";

        let err = store_with_rollback(&repo, key, Bytes::from_static(b"%PDF"), async {
            Err::<(), _>(AppError::Conflict("duplicate applicant".to_string()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(repo.fetch(key).await.is_err());
    }

    #[tokio::test]
    async fn test_successful_persist_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());
        let key = "resumes/j/b-cv.pdf";

        let value = store_with_rollback(&repo, key, Bytes::from_static(b"%PDF"), async {
            Ok::<_, AppError>(7)
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
        assert_eq!(&repo.fetch(key).await.unwrap()[..], b"%PDF");
    }
}
