use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::documents::{validate_key, DocumentError, DocumentRepository};

/// Filesystem-backed repository rooted at the configured upload directory.
pub struct LocalDocumentRepository {
    root: PathBuf,
}

impl LocalDocumentRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DocumentError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl DocumentRepository for LocalDocumentRepository {
    async fn store(&self, key: &str, bytes: Bytes) -> Result<(), DocumentError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // create_new: a concurrent upload with the same key must fail, not overwrite.
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => DocumentError::AlreadyExists(key.to_string()),
                _ => DocumentError::Io(e),
            })?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        info!("Stored document {} ({} bytes) at {}", key, bytes.len(), path.display());
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Bytes, DocumentError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DocumentError::NotFound(key.to_string()))
            }
            Err(e) => Err(DocumentError::Io(e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), DocumentError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Removed document {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DocumentError::NotFound(key.to_string()))
            }
            Err(e) => Err(DocumentError::Io(e)),
        }
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_then_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());

        repo.store("resumes/job/1-cv.pdf", Bytes::from_static(b"%PDF-data"))
            .await
            .unwrap();
        let fetched = repo.fetch("resumes/job/1-cv.pdf").await.unwrap();
        assert_eq!(&fetched[..], b"%PDF-data");
    }

    #[tokio::test]
    async fn test_store_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());

        repo.store("resumes/cv.pdf", Bytes::from_static(b"first"))
            .await
            .unwrap();
        let err = repo
            .store("resumes/cv.pdf", Bytes::from_static(b"second"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::AlreadyExists(_)));

        let kept = repo.fetch("resumes/cv.pdf").await.unwrap();
        assert_eq!(&kept[..], b"first");
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());
        let err = repo.fetch("resumes/nope.pdf").await.unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_traversal_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());
        let err = repo.fetch("../secret").await.unwrap_err();
        assert!(matches!(err, DocumentError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());

        repo.store("resumes/job/2-cv.pdf", Bytes::from_static(b"%PDF"))
            .await
            .unwrap();
        repo.delete("resumes/job/2-cv.pdf").await.unwrap();

        let err = repo.fetch("resumes/job/2-cv.pdf").await.unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
        // The key is free again once deleted.
        repo.store("resumes/job/2-cv.pdf", Bytes::from_static(b"%PDF"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalDocumentRepository::new(dir.path());
        let err = repo.delete("resumes/nope.pdf").await.unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }
}
