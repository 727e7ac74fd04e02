/// Header rewriting applied before relaying an inbound email
use crate::constants::{NOREPLY_LOCAL_PART, SES_DKIM_MARKER};
use crate::email::message::RawMessage;
use crate::error::MailRelayError;
use regex::Regex;
use std::sync::LazyLock;

static ANGLE_ADDR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Display portion of a `From` value
///
/// Returns everything outside `<...>` spans, trimmed, or an empty string
/// when the value has no angle-bracketed address. Multiple addresses and
/// comments are not interpreted.
///
/// # Examples
/// ```
/// use mailrelay_core::email::rewrite::extract_friendly_name;
///
/// assert_eq!(extract_friendly_name("Jane Doe <jane@example.com>"), "Jane Doe");
/// assert_eq!(extract_friendly_name("jane@example.com"), "");
/// ```
pub fn extract_friendly_name(from: &str) -> String {
    if ANGLE_ADDR.is_match(from) {
        ANGLE_ADDR.replace_all(from, "").trim().to_string()
    } else {
        String::new()
    }
}

/// `noreply@<domain>`, the envelope and header sender of relayed mail
pub fn noreply_address(domain: &str) -> String {
    format!("{}@{}", NOREPLY_LOCAL_PART, domain)
}

/// Sender used for the relayed copy: `Name <noreply@domain>` or `noreply@domain`
pub fn rewritten_sender(friendly_name: &str, domain: &str) -> String {
    if friendly_name.is_empty() {
        noreply_address(domain)
    } else {
        format!("{} <{}>", friendly_name, noreply_address(domain))
    }
}

/// Produces the relayable copy of `original`
///
/// `From` and `Return-Path` point at the noreply address of `domain`,
/// `Reply-To` carries the original sender, and DKIM signatures previously
/// added by SES are dropped since SES signs the message again on send.
pub fn rewrite_headers(original: &RawMessage, domain: &str) -> Result<RawMessage, MailRelayError> {
    let original_sender = original
        .get("From")
        .ok_or_else(|| MailRelayError::EmailParsing("Message has no From header".to_string()))?;

    let friendly_name = extract_friendly_name(&original_sender);
    let mut message = original.clone();

    message.set("From", &rewritten_sender(&friendly_name, domain));
    message.set("Return-Path", &noreply_address(domain));
    message.set("Reply-To", &original_sender);

    let removed = message.remove_where(|h| h.is("DKIM-Signature") && h.value().contains(SES_DKIM_MARKER));
    if removed > 0 {
        tracing::debug!(removed = removed, "Dropped SES DKIM signatures");
    }

    Ok(message)
}
