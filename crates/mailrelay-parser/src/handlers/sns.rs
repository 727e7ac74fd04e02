/// SNS handler - decodes and logs the plain-text body of SES notifications
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mailrelay_core::email::extract_plain_text;
use mailrelay_core::error::MailRelayError;
use mailrelay_core::models::{SesNotification, SnsEvent, SnsEventRecord};
use tracing::{debug, info};

/// Processes every record, returning the decoded text parts in order
pub fn handle(event: &SnsEvent) -> Result<Vec<String>, MailRelayError> {
    info!("Processing {} SNS record(s)", event.records.len());

    let mut texts = Vec::new();
    for record in &event.records {
        texts.extend(process_record(record)?);
    }

    Ok(texts)
}

#[tracing::instrument(
    name = "parser.process_record",
    skip(record),
    fields(sns_message_id = %record.sns.message_id)
)]
fn process_record(record: &SnsEventRecord) -> Result<Vec<String>, MailRelayError> {
    debug!(message = %record.sns.message, "SNS message");

    let notification: SesNotification = serde_json::from_str(&record.sns.message)?;
    let raw_email = notification_content(&notification)?;
    debug!(size = raw_email.len(), "Notification content");

    let texts = extract_plain_text(&raw_email)?;
    for text in &texts {
        info!(text = %text, "Decoded plain-text body");
    }

    Ok(texts)
}

/// Raw email bytes carried in the notification
pub fn notification_content(notification: &SesNotification) -> Result<Vec<u8>, MailRelayError> {
    if notification.is_base64() {
        let compact: String = notification.content.split_whitespace().collect();
        STANDARD
            .decode(compact)
            .map_err(|e| MailRelayError::EmailParsing(format!("Invalid base64 content: {}", e)))
    } else {
        Ok(notification.content.clone().into_bytes())
    }
}
