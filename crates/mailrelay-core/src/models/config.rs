/// Configuration models
use crate::utils::validation::{validate_domain, validate_email_address};
use serde::{Deserialize, Serialize};

/// Forwarder configuration, immutable for the Lambda lifetime
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForwarderConfig {
    /// Bucket the SES receipt rule stores raw emails in
    pub bucket_name: String,
    /// Single destination every inbound email is relayed to
    pub forward_to_address: String,
    /// SES verified domain used for the rewritten sender
    pub domain: String,
}

impl ForwarderConfig {
    /// Validates configuration is valid
    pub fn validate(&self) -> Result<(), String> {
        if self.bucket_name.trim().is_empty() {
            return Err("Bucket name not configured".to_string());
        }

        validate_email_address(&self.forward_to_address)
            .map_err(|_| format!("Invalid forward-to address: {}", self.forward_to_address))?;

        validate_domain(&self.domain).map_err(|_| format!("Invalid domain: {}", self.domain))?;

        Ok(())
    }
}
