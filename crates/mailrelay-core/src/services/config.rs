/// Configuration loading - reads forwarder settings from environment variables
use crate::constants::{ENV_BUCKET_NAME, ENV_DOMAIN, ENV_FORWARD_TO_ADDRESS};
use crate::error::MailRelayError;
use crate::models::ForwarderConfig;

impl ForwarderConfig {
    /// Loads and validates configuration from the process environment
    pub fn from_env() -> Result<Self, MailRelayError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailRelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| MailRelayError::Config(format!("Missing {} env var", name)))
        };

        let config = Self {
            bucket_name: required(ENV_BUCKET_NAME)?,
            forward_to_address: required(ENV_FORWARD_TO_ADDRESS)?,
            domain: required(ENV_DOMAIN)?,
        };

        config
            .validate()
            .map_err(|e| MailRelayError::Config(format!("Invalid configuration: {}", e)))?;

        tracing::info!(
            bucket = %config.bucket_name,
            domain = %config.domain,
            "Configuration validated successfully"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_load_config() {
        let config = ForwarderConfig::from_lookup(lookup(&[
            ("BUCKET_NAME", "raw-mail"),
            ("FORWARD_TO_ADDRESS", "me@gmail.com"),
            ("DOMAIN", "mail.example.org"),
        ]))
        .unwrap();

        assert_eq!(config.bucket_name, "raw-mail");
        assert_eq!(config.forward_to_address, "me@gmail.com");
        assert_eq!(config.domain, "mail.example.org");
    }

    #[test]
    fn test_missing_vars() {
        let err = ForwarderConfig::from_lookup(lookup(&[
            ("BUCKET_NAME", "raw-mail"),
            ("DOMAIN", "mail.example.org"),
        ]))
        .unwrap_err();

        assert!(matches!(err, MailRelayError::Config(_)));
        assert!(err.to_string().contains("FORWARD_TO_ADDRESS"));
    }

    #[test]
    fn test_blank_var_is_missing() {
        let err = ForwarderConfig::from_lookup(lookup(&[
            ("BUCKET_NAME", "  "),
            ("FORWARD_TO_ADDRESS", "me@gmail.com"),
            ("DOMAIN", "mail.example.org"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("BUCKET_NAME"));
    }

    #[test]
    fn test_invalid_values() {
        let result = ForwarderConfig::from_lookup(lookup(&[
            ("BUCKET_NAME", "raw-mail"),
            ("FORWARD_TO_ADDRESS", "me"),
            ("DOMAIN", "mail.example.org"),
        ]));

        assert!(matches!(result, Err(MailRelayError::Config(_))));
    }
}
