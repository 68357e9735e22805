//! Document Repository — pluggable storage for uploaded resume files.
//!
//! Default: `LocalDocumentRepository` (filesystem under `UPLOAD_DIR`).
//! Alternative: `S3DocumentRepository` (MinIO locally, AWS in production).
//!
//! `AppState` holds an `Arc<dyn DocumentRepository>`, chosen at startup via config.
//! Keys are always generated by `document_key`, which makes every upload unique.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

pub mod handlers;
pub mod local;
pub mod s3;

pub use local::LocalDocumentRepository;
pub use s3::S3DocumentRepository;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid document key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Stores `bytes` under `key`. Fails with `AlreadyExists` rather than overwriting.
    async fn store(&self, key: &str, bytes: Bytes) -> Result<(), DocumentError>;

    async fn fetch(&self, key: &str) -> Result<Bytes, DocumentError>;

    /// Removes the document under `key`. Missing documents yield `NotFound`.
    async fn delete(&self, key: &str) -> Result<(), DocumentError>;

    /// Backend label, surfaced in logs.
    fn backend(&self) -> &'static str;
}

/// Builds the unique storage key for an uploaded resume.
pub fn document_key(job_id: Uuid, upload_id: Uuid, sanitized_filename: &str) -> String {
    format!("resumes/{job_id}/{upload_id}-{sanitized_filename}")
}

/// Rejects keys that could escape the storage root.
pub fn validate_key(key: &str) -> Result<(), DocumentError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(DocumentError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Reduces an uploaded filename to a safe, flat ASCII name.
///
/// Path separators become spaces, whitespace runs become `_`, only
/// `[A-Za-z0-9_.-]` survive, and leading/trailing `.`/`_` are stripped.
/// Returns `None` when nothing usable is left.
pub fn secure_filename(filename: &str) -> Option<String> {
    let flattened: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// MIME type served for a stored document.
pub fn content_type_for(key: &str) -> &'static str {
    match crate::screening::extractor::file_extension(key).as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
