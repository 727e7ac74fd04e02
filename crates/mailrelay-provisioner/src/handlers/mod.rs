/// Lambda event handlers
pub mod custom_resource;

pub use custom_resource::ProvisionerContext;

use lambda_runtime::{Error, LambdaEvent};
use mailrelay_core::error::MailRelayError;
use mailrelay_core::models::CustomResourceEvent;
use serde_json::Value;
use tracing::{error, info};

/// Lambda entry point for CloudFormation custom resource requests
pub async fn handler(ctx: &ProvisionerContext, event: LambdaEvent<Value>) -> Result<Value, Error> {
    info!(payload = %event.payload, "Received custom resource event");

    let request: CustomResourceEvent = match serde_json::from_value(event.payload.clone()) {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to parse custom resource event: {}", e);

            // Still unblock the stack when the request says where to report
            return match custom_resource::reject_malformed(ctx, &event.payload).await? {
                Some(response) => Ok(serde_json::to_value(response)?),
                None => Err(MailRelayError::InvalidEvent(format!(
                    "Invalid custom resource event: {}",
                    e
                ))
                .into()),
            };
        }
    };

    let response = custom_resource::handle(ctx, &request).await?;
    Ok(serde_json::to_value(response)?)
}
