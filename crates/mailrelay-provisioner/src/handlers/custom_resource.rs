/// Custom resource handler - manages the SES domain identity and receipt rule set
use mailrelay_core::constants::{
    ENV_LOG_STREAM_NAME, RESOURCE_ACTIVE_RULE_SET, RESOURCE_DOMAIN_IDENTITY,
};
use mailrelay_core::error::MailRelayError;
use mailrelay_core::models::{
    CustomResourceEvent, CustomResourceResponse, DnsRecord, RequestType, ResponseStatus,
    failed_response_for_payload,
};
use mailrelay_core::services::cloudformation::HttpResponseSender;
use mailrelay_core::services::ses::SesIdentityService;
use mailrelay_core::services::{IdentityService, ResponseSender};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

/// Provisioner handler context
pub struct ProvisionerContext {
    pub identity: Arc<dyn IdentityService>,
    pub responder: Arc<dyn ResponseSender>,
    /// Reported as the physical resource ID
    pub log_stream: String,
}

impl ProvisionerContext {
    pub async fn new() -> Self {
        let aws_config = aws_config::load_from_env().await;
        let ses_client = aws_sdk_ses::Client::new(&aws_config);

        Self {
            identity: Arc::new(SesIdentityService::new(ses_client)),
            responder: Arc::new(HttpResponseSender::default()),
            log_stream: std::env::var(ENV_LOG_STREAM_NAME).unwrap_or_default(),
        }
    }
}

/// Runs the requested lifecycle action and always reports back to CloudFormation
///
/// Only a failure to deliver the response fails the invocation; action
/// failures are reported as `FAILED` to the stack.
#[tracing::instrument(
    name = "provisioner.handle",
    skip(ctx, event),
    fields(
        request_type = ?event.request_type,
        resource_type = %event.resource_type,
        logical_resource_id = %event.logical_resource_id
    )
)]
pub async fn handle(
    ctx: &ProvisionerContext,
    event: &CustomResourceEvent,
) -> Result<CustomResourceResponse, MailRelayError> {
    let (status, data) = match provision(ctx.identity.as_ref(), event).await {
        Ok(data) => (ResponseStatus::Success, data),
        Err(e) => {
            error!(error = %e, "Signaling failure to CloudFormation");
            (ResponseStatus::Failed, json!({}))
        }
    };

    let response = CustomResourceResponse::new(event, status, &ctx.log_stream, data);
    ctx.responder.send(&event.response_url, &response).await?;

    Ok(response)
}

/// Reports `FAILED` for a payload that is not a valid custom resource event
///
/// Returns `None` when the payload has no `ResponseURL` to report to.
pub async fn reject_malformed(
    ctx: &ProvisionerContext,
    payload: &Value,
) -> Result<Option<CustomResourceResponse>, MailRelayError> {
    let Some((response_url, response)) = failed_response_for_payload(payload, &ctx.log_stream)
    else {
        return Ok(None);
    };

    ctx.responder.send(&response_url, &response).await?;
    Ok(Some(response))
}

/// Applies the lifecycle event and returns the response `Data`
pub async fn provision(
    identity: &dyn IdentityService,
    event: &CustomResourceEvent,
) -> Result<Value, MailRelayError> {
    match event.resource_type.as_str() {
        RESOURCE_DOMAIN_IDENTITY => {
            let zone_name = event.property("ZoneName")?;

            match event.request_type {
                // Property changes replace the resource, so updates create too
                RequestType::Create | RequestType::Update => {
                    info!(zone = %zone_name, "Creating verification identity");

                    let records: Vec<DnsRecord> = identity
                        .verify_domain_dkim(zone_name)
                        .await?
                        .iter()
                        .map(|token| DnsRecord::dkim_cname(token, zone_name))
                        .collect();

                    Ok(json!({
                        "records": records,
                        "message": format!("Created verification identity for {}", zone_name),
                    }))
                }
                RequestType::Delete => {
                    info!(zone = %zone_name, "Deleting verification identity");
                    identity.delete_identity(zone_name).await?;
                    Ok(json!({}))
                }
            }
        }
        RESOURCE_ACTIVE_RULE_SET if event.request_type != RequestType::Delete => {
            let rule_set_name = event.property("RuleSetName")?;
            info!(rule_set = %rule_set_name, "Setting active receipt rule set");
            identity.set_active_receipt_rule_set(rule_set_name).await?;
            Ok(json!({}))
        }
        other => {
            info!(
                resource_type = %other,
                request_type = ?event.request_type,
                "Nothing to do for request"
            );
            Ok(json!({}))
        }
    }
}
