/// Mock AWS services for integration testing
use async_trait::async_trait;
use mailrelay_core::error::MailRelayError;
use mailrelay_core::services::{EmailSender, StorageService};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory S3 that records every download request
#[derive(Clone, Default)]
pub struct MockS3 {
    objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockS3 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_object(&self, bucket: &str, key: &str, data: Vec<u8>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data);
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageService for MockS3 {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, MailRelayError> {
        self.requests
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));

        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| MailRelayError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub raw: Vec<u8>,
    pub from: String,
    pub to: Vec<String>,
}

impl SentEmail {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw).to_string()
    }
}

/// Mock SES client; optionally rejects every send with the given error
#[derive(Clone, Default)]
pub struct MockSes {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failure: Option<(String, String)>,
}

impl MockSes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(code: &str, message: &str) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some((code.to_string(), message.to_string())),
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MockSes {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, MailRelayError> {
        if let Some((code, message)) = &self.failure {
            return Err(MailRelayError::ses(code.as_str(), message.as_str()));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(SentEmail {
            raw: raw_email.to_vec(),
            from: from.to_string(),
            to: to.to_vec(),
        });
        Ok(format!("ses-{}", sent.len()))
    }
}
