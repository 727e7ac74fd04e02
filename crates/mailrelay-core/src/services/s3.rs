/// S3 storage service
use crate::error::MailRelayError;
use async_trait::async_trait;
use aws_smithy_types::error::display::DisplayErrorContext;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Reads a whole object; a missing key is reported as `NotFound`
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, MailRelayError>;
}

/// S3 storage service implementation
pub struct S3StorageService {
    client: aws_sdk_s3::Client,
}

impl S3StorageService {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, MailRelayError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);

                if not_found {
                    MailRelayError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    MailRelayError::Storage(format!(
                        "S3 download failed: {}",
                        DisplayErrorContext(&e)
                    ))
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| MailRelayError::Storage(format!("Failed to read S3 object body: {}", e)))?
            .into_bytes()
            .to_vec();

        tracing::info!(
            bucket = %bucket,
            size = data.len(),
            "Downloaded raw email from S3"
        );
        Ok(data)
    }
}
