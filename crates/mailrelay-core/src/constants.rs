/// Application constants
///
/// Hardcoded values shared by the forwarder, provisioner and parser Lambdas.
// ============================================================================
// Forwarding Constants
// ============================================================================
/// Local part of the rewritten sender address
pub const NOREPLY_LOCAL_PART: &str = "noreply";

/// Marker identifying DKIM signatures produced by the SES relay itself
pub const SES_DKIM_MARKER: &str = "amazonses.com";

// ============================================================================
// Environment Variables
// ============================================================================

pub const ENV_BUCKET_NAME: &str = "BUCKET_NAME";
pub const ENV_FORWARD_TO_ADDRESS: &str = "FORWARD_TO_ADDRESS";
pub const ENV_DOMAIN: &str = "DOMAIN";

/// Set by the Lambda runtime; used as the custom resource physical ID
pub const ENV_LOG_STREAM_NAME: &str = "AWS_LAMBDA_LOG_STREAM_NAME";

// ============================================================================
// Provisioning Constants
// ============================================================================

/// Custom resource type that manages the SES domain identity
pub const RESOURCE_DOMAIN_IDENTITY: &str = "Custom::InvokeCustomLambda";

/// Custom resource type that activates a receipt rule set
pub const RESOURCE_ACTIVE_RULE_SET: &str = "Custom::SetActiveRuleSet";

/// TTL for the generated DKIM CNAME records, in seconds
pub const DKIM_RECORD_TTL: &str = "60";

/// Suffix of the CNAME targets SES publishes DKIM keys under
pub const DKIM_TARGET_SUFFIX: &str = "dkim.amazonses.com";

// ============================================================================
// Parsing Constants
// ============================================================================

/// SES SNS action encoding for base64 encoded content
pub const SNS_CONTENT_ENCODING_BASE64: &str = "BASE64";
