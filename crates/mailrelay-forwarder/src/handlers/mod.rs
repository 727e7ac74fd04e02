/// Lambda event handlers
pub mod forward;

pub use forward::{ForwardOutcome, Forwarder};

use lambda_runtime::{Error, LambdaEvent};
use mailrelay_core::error::MailRelayError;
use mailrelay_core::models::SesEvent;
use serde_json::Value;
use tracing::{error, info};

/// Lambda entry point for SES receipt rule invocations
pub async fn handler(forwarder: &Forwarder, event: LambdaEvent<Value>) -> Result<Value, Error> {
    info!(payload = %event.payload, "Received SES event");

    let ses_event: SesEvent = serde_json::from_value(event.payload).map_err(|e| {
        error!("Failed to parse SES event: {}", e);
        MailRelayError::InvalidEvent(format!("Invalid SES event: {}", e))
    })?;

    let mail = ses_event.first_mail()?;
    let response = match forwarder.forward(mail).await? {
        ForwardOutcome::Relayed { ses_message_id } => serde_json::json!({
            "status": "relayed",
            "sesMessageId": ses_message_id,
        }),
        ForwardOutcome::RelayFailed { error } => serde_json::json!({
            "status": "relay_failed",
            "error": error.to_string(),
        }),
    };

    info!(response = %response, "Forwarding finished");
    Ok(response)
}
