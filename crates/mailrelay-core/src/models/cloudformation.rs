/// CloudFormation custom resource request and response models
use crate::constants::{DKIM_RECORD_TTL, DKIM_TARGET_SUFFIX};
use crate::error::MailRelayError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// Lifecycle event sent by CloudFormation to a custom resource provider
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub resource_type: String,
    pub logical_resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Map<String, Value>,
}

impl CustomResourceEvent {
    /// Looks up a required string property of the resource
    pub fn property(&self, name: &str) -> Result<&str, MailRelayError> {
        self.resource_properties
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                MailRelayError::InvalidEvent(format!(
                    "Missing resource property {} for {}",
                    name, self.logical_resource_id
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ResponseStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

/// Body PUT to the pre-signed response URL
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: Value,
}

impl CustomResourceResponse {
    pub fn new(
        event: &CustomResourceEvent,
        status: ResponseStatus,
        log_stream: &str,
        data: Value,
    ) -> Self {
        Self {
            status,
            reason: reason(log_stream),
            physical_resource_id: physical_resource_id(log_stream, &event.request_id),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data,
        }
    }
}

/// `FAILED` response for a request that did not deserialize
///
/// Identifiers are copied from the raw payload where present. Returns the
/// response URL with the body, or `None` when there is nowhere to report to.
pub fn failed_response_for_payload(
    payload: &Value,
    log_stream: &str,
) -> Option<(String, CustomResourceResponse)> {
    let field = |name: &str| {
        payload
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let response_url = field("ResponseURL");
    if response_url.is_empty() {
        return None;
    }

    let request_id = field("RequestId");
    let response = CustomResourceResponse {
        status: ResponseStatus::Failed,
        reason: reason(log_stream),
        physical_resource_id: physical_resource_id(log_stream, &request_id),
        stack_id: field("StackId"),
        request_id,
        logical_resource_id: field("LogicalResourceId"),
        no_echo: false,
        data: Value::Object(Map::new()),
    };
    Some((response_url, response))
}

fn reason(log_stream: &str) -> String {
    format!("See the details in CloudWatch Log Stream: {}", log_stream)
}

// Falls back to the request id when the log stream name is unavailable
fn physical_resource_id(log_stream: &str, request_id: &str) -> String {
    if log_stream.is_empty() {
        request_id.to_string()
    } else {
        log_stream.to_string()
    }
}

/// DNS record descriptor returned to the stack for DKIM verification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL")]
    pub ttl: String,
    pub resource_records: Vec<String>,
}

impl DnsRecord {
    /// CNAME publishing a DKIM token for `zone`
    pub fn dkim_cname(token: &str, zone: &str) -> Self {
        Self {
            name: format!("{}._domainkey.{}", token, zone),
            record_type: "CNAME".to_string(),
            ttl: DKIM_RECORD_TTL.to_string(),
            resource_records: vec![format!("{}.{}", token, DKIM_TARGET_SUFFIX)],
        }
    }
}
