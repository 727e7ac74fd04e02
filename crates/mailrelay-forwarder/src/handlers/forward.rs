/// Forwarding handler - rewrites an inbound email and relays it through SES
use mailrelay_core::email::{RawMessage, rewrite_headers};
use mailrelay_core::error::MailRelayError;
use mailrelay_core::models::{ForwarderConfig, SesMail};
use mailrelay_core::services::s3::S3StorageService;
use mailrelay_core::services::ses::SesEmailSender;
use mailrelay_core::services::{EmailSender, StorageService};
use mailrelay_core::utils::logging::{redact_email, redact_subject};
use mailrelay_core::utils::validation::validate_email_address;
use std::sync::Arc;
use tracing::{error, info};

/// Result of a forward call that did not fail the invocation
#[derive(Debug)]
pub enum ForwardOutcome {
    Relayed { ses_message_id: String },
    /// SES rejected the message; logged and deliberately not propagated
    RelayFailed { error: MailRelayError },
}

pub struct Forwarder {
    storage: Arc<dyn StorageService>,
    sender: Arc<dyn EmailSender>,
    config: ForwarderConfig,
}

impl Forwarder {
    pub fn new(
        storage: Arc<dyn StorageService>,
        sender: Arc<dyn EmailSender>,
        config: ForwarderConfig,
    ) -> Self {
        Self {
            storage,
            sender,
            config,
        }
    }

    /// Builds the forwarder from the environment with real AWS clients
    pub async fn from_env() -> Result<Self, MailRelayError> {
        let config = ForwarderConfig::from_env()?;
        let aws_config = aws_config::load_from_env().await;

        let s3_client = aws_sdk_s3::Client::new(&aws_config);
        let ses_client = aws_sdk_ses::Client::new(&aws_config);

        Ok(Self::new(
            Arc::new(S3StorageService::new(s3_client)),
            Arc::new(SesEmailSender::new(ses_client)),
            config,
        ))
    }

    #[tracing::instrument(
        name = "forwarder.forward",
        skip(self, mail),
        fields(message_id = %mail.message_id)
    )]
    pub async fn forward(&self, mail: &SesMail) -> Result<ForwardOutcome, MailRelayError> {
        // 1. Locate and download the raw email
        let key = object_key(mail)?;
        let original_recipient = &mail.destination[0];
        let raw_email = self
            .storage
            .download(&self.config.bucket_name, &key)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch raw email"))?;

        // 2. Parse
        let original = RawMessage::parse(&raw_email)?;
        let from = original.get("From").unwrap_or_default();
        let subject = original.get("Subject").unwrap_or_default();
        info!(
            from = %redact_email(&from),
            subject = %redact_subject(&subject),
            size = raw_email.len(),
            "Parsed inbound email"
        );

        // 3. Rewrite sender headers for relaying
        let rewritten = rewrite_headers(&original, &self.config.domain)?;

        // 4. Relay; delivery failures are logged, not propagated
        let destinations = vec![self.config.forward_to_address.clone()];
        match self
            .sender
            .send_raw_email(&rewritten.to_bytes(), original_recipient, &destinations)
            .await
        {
            Ok(ses_message_id) => {
                info!(ses_message_id = %ses_message_id, "Relayed email");
                Ok(ForwardOutcome::Relayed { ses_message_id })
            }
            Err(e) => {
                match &e {
                    MailRelayError::Ses { code, message } => {
                        error!(code = %code, message = %message, "SES rejected relayed email");
                    }
                    other => error!(error = %other, "Failed to relay email"),
                }
                Ok(ForwardOutcome::RelayFailed { error: e })
            }
        }
    }
}

/// S3 key the receipt rule stored the message under: `<recipient>/<messageId>`
pub fn object_key(mail: &SesMail) -> Result<String, MailRelayError> {
    if mail.message_id.trim().is_empty() {
        return Err(MailRelayError::InvalidEvent(
            "SES mail has no messageId".to_string(),
        ));
    }

    let recipient = mail.original_recipient().ok_or_else(|| {
        MailRelayError::InvalidEvent("SES mail has no destination".to_string())
    })?;
    validate_email_address(recipient)?;

    Ok(format!("{}/{}", recipient, mail.message_id))
}
