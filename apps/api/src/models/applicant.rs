use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored application. `ats_status` and `resume_quality` hold the
/// `as_str()` forms of `AtsStatus` and `QualityLabel`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub document_key: String,
    pub match_score: f64,
    pub missing_keywords: Vec<String>,
    pub ats_status: String,
    pub resume_quality: String,
    pub created_at: DateTime<Utc>,
}
