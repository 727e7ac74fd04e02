/// Input validation utilities
use crate::error::MailRelayError;
use regex::Regex;
use std::sync::LazyLock;

// Local part accepts the full RFC 5322 atext set
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$").unwrap()
});

pub fn validate_email_address(email: &str) -> Result<(), MailRelayError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(MailRelayError::InvalidEvent(format!(
            "Invalid email address: {}",
            email
        )))
    }
}

pub fn validate_domain(domain: &str) -> Result<(), MailRelayError> {
    if DOMAIN_REGEX.is_match(domain) {
        Ok(())
    } else {
        Err(MailRelayError::Config(format!("Invalid domain: {}", domain)))
    }
}
