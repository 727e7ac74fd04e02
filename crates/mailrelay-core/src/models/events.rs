/// AWS Lambda event types for SES receipt notifications
use crate::error::MailRelayError;
use serde::{Deserialize, Serialize};

/// SES event from direct Lambda invocation (receipt rule Lambda action)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SesEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SesEventRecord>,
}

impl SesEvent {
    /// Returns the mail section of the first record; later records are ignored
    pub fn first_mail(&self) -> Result<&SesMail, MailRelayError> {
        self.records
            .first()
            .map(|record| &record.ses.mail)
            .ok_or_else(|| MailRelayError::InvalidEvent("SES event has no records".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SesEventRecord {
    #[serde(rename = "eventSource", default)]
    pub event_source: String,
    #[serde(rename = "eventVersion", default)]
    pub event_version: String,
    pub ses: SesPayload,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SesPayload {
    pub mail: SesMail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SesReceipt>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SesMail {
    #[serde(rename = "messageId", default)]
    pub message_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Vec<String>,
}

impl SesMail {
    /// The address the message was originally delivered to
    pub fn original_recipient(&self) -> Option<&str> {
        self.destination.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SesReceipt {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(rename = "spfVerdict", default)]
    pub spf_verdict: Option<Verdict>,
    #[serde(rename = "dkimVerdict", default)]
    pub dkim_verdict: Option<Verdict>,
    #[serde(rename = "spamVerdict", default)]
    pub spam_verdict: Option<Verdict>,
    #[serde(rename = "virusVerdict", default)]
    pub virus_verdict: Option<Verdict>,
    #[serde(default)]
    pub action: Option<SesAction>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Verdict {
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SesAction {
    #[serde(rename = "type", default)]
    pub action_type: String,
    #[serde(rename = "bucketName", default)]
    pub bucket_name: Option<String>,
    #[serde(rename = "objectKey", default)]
    pub object_key: Option<String>,
    #[serde(rename = "topicArn", default)]
    pub topic_arn: Option<String>,
    /// `UTF8` or `BASE64` for SNS actions
    #[serde(default)]
    pub encoding: Option<String>,
}

/// SNS event wrapping SES notifications
#[derive(Debug, Clone, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SnsEventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsEventRecord {
    #[serde(rename = "EventSource", default)]
    pub event_source: String,
    #[serde(rename = "Sns")]
    pub sns: SnsMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsMessage {
    #[serde(rename = "MessageId", default)]
    pub message_id: String,
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,
    #[serde(rename = "Message")]
    pub message: String,
}

/// Notification published by the SES SNS receipt action
#[derive(Debug, Clone, Deserialize)]
pub struct SesNotification {
    #[serde(rename = "notificationType", default)]
    pub notification_type: String,
    #[serde(default)]
    pub mail: Option<SesMail>,
    #[serde(default)]
    pub receipt: Option<SesReceipt>,
    /// Raw email, encoded as declared by `receipt.action.encoding`
    pub content: String,
}

impl SesNotification {
    pub fn is_base64(&self) -> bool {
        self.receipt
            .as_ref()
            .and_then(|r| r.action.as_ref())
            .and_then(|a| a.encoding.as_deref())
            .map(|e| e.eq_ignore_ascii_case(crate::constants::SNS_CONTENT_ENCODING_BASE64))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ses_event_deserialization() {
        let json = r#"{
            "Records": [{
                "eventSource": "aws:ses",
                "eventVersion": "1.0",
                "ses": {
                    "mail": {
                        "messageId": "o3vrnil0e2ic28trm7dfhrc2v0clambda4nbp0g1",
                        "timestamp": "2025-11-01T12:00:00.000Z",
                        "source": "jane@example.com",
                        "destination": ["me@mail.example.org", "other@mail.example.org"]
                    },
                    "receipt": {
                        "timestamp": "2025-11-01T12:00:00.000Z",
                        "recipients": ["me@mail.example.org"],
                        "spfVerdict": {"status": "PASS"},
                        "action": {
                            "type": "Lambda",
                            "functionArn": "arn:aws:lambda:us-east-1:123:function:forwarder"
                        }
                    }
                }
            }]
        }"#;

        let event: SesEvent = serde_json::from_str(json).unwrap();
        let mail = event.first_mail().unwrap();
        assert_eq!(mail.message_id, "o3vrnil0e2ic28trm7dfhrc2v0clambda4nbp0g1");
        assert_eq!(mail.original_recipient(), Some("me@mail.example.org"));
        assert_eq!(mail.source.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_ses_event_minimal_payload() {
        let json = r#"{"Records": [{"ses": {"mail": {"messageId": "abc", "destination": ["me@acme.com"]}}}]}"#;

        let event: SesEvent = serde_json::from_str(json).unwrap();
        assert!(event.records[0].ses.receipt.is_none());
        assert_eq!(event.first_mail().unwrap().message_id, "abc");
    }

    #[test]
    fn test_ses_event_without_records() {
        let event: SesEvent = serde_json::from_str(r#"{"Records": []}"#).unwrap();
        assert!(matches!(
            event.first_mail(),
            Err(MailRelayError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_missing_destination_defaults_to_empty() {
        let json = r#"{"Records": [{"ses": {"mail": {"messageId": "abc"}}}]}"#;

        let event: SesEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.first_mail().unwrap().original_recipient(), None);
    }

    #[test]
    fn test_sns_event_deserialization() {
        let json = r#"{
            "Records": [{
                "EventSource": "aws:sns",
                "Sns": {
                    "MessageId": "sns-1",
                    "Subject": "Amazon SES Email Receipt Notification",
                    "Message": "{\"notificationType\":\"Received\",\"content\":\"Subject: hi\\r\\n\\r\\nbody\"}"
                }
            }]
        }"#;

        let event: SnsEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.records.len(), 1);

        let notification: SesNotification =
            serde_json::from_str(&event.records[0].sns.message).unwrap();
        assert_eq!(notification.notification_type, "Received");
        assert!(notification.content.contains("body"));
        assert!(!notification.is_base64());
    }

    #[test]
    fn test_notification_encoding() {
        let json = r#"{
            "notificationType": "Received",
            "receipt": {"action": {"type": "SNS", "encoding": "BASE64"}},
            "content": "U3ViamVjdDogaGkNCg0KYm9keQ=="
        }"#;

        let notification: SesNotification = serde_json::from_str(json).unwrap();
        assert!(notification.is_base64());
    }
}
