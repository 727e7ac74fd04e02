/// Plain-text body extraction using mail-parser
use crate::error::MailRelayError;
use mail_parser::{Message, MessageParser, MessagePart, MimeHeaders, PartType};

/// Decodes the plain-text content of a raw email
///
/// Multipart messages yield one entry per `text/plain` part, including those
/// of attached messages. Single-part messages yield their whole body. Text
/// is decoded with the declared charset; unknown charsets and invalid byte
/// sequences fall back to lossy UTF-8, so decoding itself never fails.
pub fn extract_plain_text(raw_email: &[u8]) -> Result<Vec<String>, MailRelayError> {
    let message = MessageParser::default()
        .parse(raw_email)
        .ok_or_else(|| MailRelayError::EmailParsing("Failed to parse email".to_string()))?;

    let mut texts = Vec::new();
    if is_multipart(message.root_part()) {
        collect_plain_text(&message, &mut texts);
    } else {
        texts.push(decode_part(message.root_part()));
    }

    Ok(texts)
}

fn collect_plain_text(message: &Message, texts: &mut Vec<String>) {
    for part in message.parts.iter() {
        match &part.body {
            PartType::Message(nested) => collect_plain_text(nested, texts),
            _ if is_plain_text(part) => texts.push(decode_part(part)),
            _ => {}
        }
    }
}

fn is_multipart(part: &MessagePart) -> bool {
    matches!(part.body, PartType::Multipart(_))
}

fn is_plain_text(part: &MessagePart) -> bool {
    match part.content_type() {
        Some(ct) => {
            ct.ctype().eq_ignore_ascii_case("text")
                && ct
                    .subtype()
                    .map(|s| s.eq_ignore_ascii_case("plain"))
                    .unwrap_or(false)
        }
        // Parts without a Content-Type default to text/plain
        None => matches!(part.body, PartType::Text(_)),
    }
}

fn decode_part(part: &MessagePart) -> String {
    match &part.body {
        PartType::Text(text) | PartType::Html(text) => text.to_string(),
        PartType::Binary(data) | PartType::InlineBinary(data) => {
            String::from_utf8_lossy(data).into_owned()
        }
        PartType::Message(_) | PartType::Multipart(_) => String::new(),
    }
}
