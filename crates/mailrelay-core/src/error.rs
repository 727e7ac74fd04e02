/// Error types for Mailrelay system
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailRelayError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Email parsing error: {0}")]
    EmailParsing(String),

    #[error("SES error: {code}: {message}")]
    Ses { code: String, message: String },

    #[error("CloudFormation response error: {0}")]
    CfnResponse(String),
}

impl MailRelayError {
    /// Builds an SES error from an error code and message
    pub fn ses(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ses {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Determines if an error may be swallowed by the invocation
    ///
    /// Only delivery failures are recovered locally; input and storage
    /// errors always fail the invocation.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Ses { .. } => true,
            Self::InvalidEvent(_) => false,
            Self::Config(_) => false,
            Self::NotFound { .. } => false,
            Self::Storage(_) => false,
            Self::EmailParsing(_) => false,
            Self::CfnResponse(_) => false,
        }
    }
}

impl From<serde_json::Error> for MailRelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidEvent(err.to_string())
    }
}

impl From<std::env::VarError> for MailRelayError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}
