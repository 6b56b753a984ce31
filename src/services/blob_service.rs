use aws_sdk_s3::{Client as S3Client, primitives::ByteStream};
use uuid::Uuid;

use crate::{
    config::BlobConfig,
    error::{AppError, Result},
};

/// Public-read blob storage backed by S3. `put` returns the public URL the
/// stored object is reachable at.
#[derive(Clone)]
pub struct BlobStore {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl BlobStore {
    pub fn new(client: S3Client, config: &BlobConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        // Prefix with a UUID so repeated uploads of the same filename never
        // overwrite each other.
        let key = format!("{}-{}", Uuid::new_v4(), name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Blob upload failed: {}", e)))?;

        Ok(format!("{}/{}", self.public_base_url, key))
    }
}
