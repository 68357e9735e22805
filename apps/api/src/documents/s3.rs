use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::documents::{content_type_for, validate_key, DocumentError, DocumentRepository};

/// Object-storage repository (MinIO locally, AWS in production).
pub struct S3DocumentRepository {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentRepository {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Constructs an S3 client configured for MinIO (local) or AWS (production).
    pub async fn connect(
        endpoint: &str,
        access_key_id: &str,
        secret_access_key: &str,
        bucket: String,
    ) -> Self {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "screener-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .load()
            .await;

        Self::new(aws_sdk_s3::Client::new(&s3_config), bucket)
    }
}

#[async_trait]
impl DocumentRepository for S3DocumentRepository {
    async fn store(&self, key: &str, bytes: Bytes) -> Result<(), DocumentError> {
        validate_key(key)?;
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type_for(key))
            .send()
            .await
            .map_err(|e| DocumentError::S3(format!("upload failed: {e}")))?;

        info!("Uploaded document to s3://{}/{} ({} bytes)", self.bucket, key, size);
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Bytes, DocumentError> {
        validate_key(key)?;
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if not_found {
                    DocumentError::NotFound(key.to_string())
                } else {
                    DocumentError::S3(format!("download failed: {e}"))
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| DocumentError::S3(format!("reading body failed: {e}")))?;
        Ok(data.into_bytes())
    }

    async fn delete(&self, key: &str) -> Result<(), DocumentError> {
        validate_key(key)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| DocumentError::S3(format!("delete failed: {e}")))?;

        info!("Removed document s3://{}/{}", self.bucket, key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}
