/// Lambda event handlers
pub mod sns;

use lambda_runtime::{Error, LambdaEvent};
use mailrelay_core::error::MailRelayError;
use mailrelay_core::models::SnsEvent;
use serde_json::Value;
use tracing::{error, info};

/// Lambda entry point for SNS notifications published by SES
pub async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    info!(payload = %event.payload, "Received SNS event");

    let sns_event: SnsEvent = serde_json::from_value(event.payload).map_err(|e| {
        error!("Failed to parse SNS event: {}", e);
        MailRelayError::InvalidEvent(format!("Invalid SNS event: {}", e))
    })?;

    let texts = sns::handle(&sns_event)?;

    Ok(serde_json::json!({
        "records": sns_event.records.len(),
        "textParts": texts.len(),
    }))
}
