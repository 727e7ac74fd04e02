/// SES sending and identity management services
use crate::error::MailRelayError;
use async_trait::async_trait;
use aws_sdk_ses::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends a pre-built MIME message, returning the SES message ID
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, MailRelayError>;
}

/// Domain identity and receipt rule management
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Creates (or refreshes) the domain identity and returns its DKIM tokens
    async fn verify_domain_dkim(&self, domain: &str) -> Result<Vec<String>, MailRelayError>;
    async fn delete_identity(&self, identity: &str) -> Result<(), MailRelayError>;
    async fn set_active_receipt_rule_set(&self, rule_set_name: &str) -> Result<(), MailRelayError>;
}

/// Keeps the service error code and message so callers can log them as-is
fn ses_error<E, R>(err: SdkError<E, R>) -> MailRelayError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().unwrap_or("Unknown").to_string();
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    MailRelayError::ses(code, message)
}

pub struct SesEmailSender {
    client: aws_sdk_ses::Client,
}

impl SesEmailSender {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, MailRelayError> {
        use aws_sdk_ses::primitives::Blob;

        let raw_message = aws_sdk_ses::types::RawMessage::builder()
            .data(Blob::new(raw_email))
            .build()
            .map_err(|e| MailRelayError::ses("InvalidRawMessage", e.to_string()))?;

        let response = self
            .client
            .send_raw_email()
            .raw_message(raw_message)
            .source(from)
            .set_destinations(Some(to.to_vec()))
            .send()
            .await
            .map_err(ses_error)?;

        tracing::info!(
            ses_message_id = %response.message_id,
            destinations = to.len(),
            "Sent raw email via SES"
        );
        Ok(response.message_id)
    }
}

pub struct SesIdentityService {
    client: aws_sdk_ses::Client,
}

impl SesIdentityService {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityService for SesIdentityService {
    async fn verify_domain_dkim(&self, domain: &str) -> Result<Vec<String>, MailRelayError> {
        let response = self
            .client
            .verify_domain_dkim()
            .domain(domain)
            .send()
            .await
            .map_err(ses_error)?;

        tracing::info!(
            domain = %domain,
            tokens = response.dkim_tokens.len(),
            "Requested DKIM verification"
        );
        Ok(response.dkim_tokens)
    }

    async fn delete_identity(&self, identity: &str) -> Result<(), MailRelayError> {
        self.client
            .delete_identity()
            .identity(identity)
            .send()
            .await
            .map_err(ses_error)?;

        tracing::info!(identity = %identity, "Deleted SES identity");
        Ok(())
    }

    async fn set_active_receipt_rule_set(&self, rule_set_name: &str) -> Result<(), MailRelayError> {
        self.client
            .set_active_receipt_rule_set()
            .rule_set_name(rule_set_name)
            .send()
            .await
            .map_err(ses_error)?;

        tracing::info!(rule_set = %rule_set_name, "Activated receipt rule set");
        Ok(())
    }
}
