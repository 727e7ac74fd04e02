/// Delivery of custom resource responses back to CloudFormation
use crate::error::MailRelayError;
use crate::models::CustomResourceResponse;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ResponseSender: Send + Sync {
    async fn send(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> Result<(), MailRelayError>;
}

/// PUTs the response JSON to the pre-signed S3 URL from the request
pub struct HttpResponseSender {
    client: reqwest::Client,
}

impl HttpResponseSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpResponseSender {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl ResponseSender for HttpResponseSender {
    async fn send(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> Result<(), MailRelayError> {
        let body = serde_json::to_vec(response)
            .map_err(|e| MailRelayError::CfnResponse(format!("Failed to serialize response: {}", e)))?;

        // The pre-signed URL is signed without a content type
        let result = self
            .client
            .put(response_url)
            .header(CONTENT_TYPE, "")
            .body(body)
            .send()
            .await
            .map_err(|e| MailRelayError::CfnResponse(format!("Failed to send response: {}", e)))?;

        let status = result.status();
        if !status.is_success() {
            let text = result.text().await.unwrap_or_default();
            return Err(MailRelayError::CfnResponse(format!(
                "status: {}, body: {}",
                status, text
            )));
        }

        tracing::info!(
            status = ?response.status,
            logical_resource_id = %response.logical_resource_id,
            "Sent custom resource response"
        );
        Ok(())
    }
}
