//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use mailrelay_core::models::{ForwarderConfig, SesEvent};
use std::path::PathBuf;

pub mod mock_aws;

pub const DOMAIN: &str = "mail.example.org";
pub const BUCKET: &str = "mailrelay-raw-emails-test";
pub const FORWARD_TO: &str = "me@gmail.com";
pub const RECIPIENT: &str = "me@mail.example.org";

/// Get path to test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load a test email fixture
pub fn load_email_fixture(name: &str) -> Vec<u8> {
    let path = fixtures_dir().join("emails").join(name);
    std::fs::read(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {:?}", path))
}

/// Generate a unique SES message ID
pub fn generate_test_message_id() -> String {
    format!("test-{}", uuid::Uuid::new_v4())
}

pub fn test_config() -> ForwarderConfig {
    ForwarderConfig {
        bucket_name: BUCKET.to_string(),
        forward_to_address: FORWARD_TO.to_string(),
        domain: DOMAIN.to_string(),
    }
}

/// SES receipt rule Lambda payload for one message
pub fn ses_event_json(message_id: &str, destination: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "Records": [{
            "eventSource": "aws:ses",
            "eventVersion": "1.0",
            "ses": {
                "mail": {
                    "messageId": message_id,
                    "timestamp": "2025-11-01T12:00:00.000Z",
                    "source": "jane@example.com",
                    "destination": destination
                },
                "receipt": {
                    "timestamp": "2025-11-01T12:00:00.000Z",
                    "recipients": destination,
                    "spfVerdict": {"status": "PASS"},
                    "dkimVerdict": {"status": "PASS"},
                    "action": {
                        "type": "Lambda",
                        "functionArn": "arn:aws:lambda:us-east-1:123456789012:function:forwarder",
                        "invocationType": "Event"
                    }
                }
            }
        }]
    })
}

pub fn ses_event(message_id: &str, destination: &[&str]) -> SesEvent {
    serde_json::from_value(ses_event_json(message_id, destination)).unwrap()
}
