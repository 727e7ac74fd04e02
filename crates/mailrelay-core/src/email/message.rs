/// Raw RFC 5322 message with an editable header section
///
/// Headers are kept as an ordered list of raw fields cut out of the original
/// bytes, so anything not explicitly rewritten (folding, 8-bit bytes, header
/// order) round-trips unchanged. The body is never re-encoded.
use crate::error::MailRelayError;
use mail_parser::MessageParser;

/// A single header field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    /// The whole field as it appears on the wire, line break included
    raw: Vec<u8>,
    /// Offset of the value (just past the colon) within `raw`
    value_start: usize,
}

impl Header {
    pub fn new(name: &str, value: &str, line_ending: &[u8]) -> Self {
        let mut raw = format!("{}: {}", name, value).into_bytes();
        raw.extend_from_slice(line_ending);

        Self {
            name: name.to_string(),
            raw,
            value_start: name.len() + 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name comparison
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Unfolded, trimmed value
    pub fn value(&self) -> String {
        String::from_utf8_lossy(self.raw_value())
            .chars()
            .filter(|c| *c != '\r' && *c != '\n')
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Everything after the colon, including folds, excluding the final line break
    pub fn raw_value(&self) -> &[u8] {
        let end = self.raw.len() - line_break_len(&self.raw);
        &self.raw[self.value_start.min(end)..end]
    }

    fn ends_with_line_break(&self) -> bool {
        self.raw.ends_with(b"\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    headers: Vec<Header>,
    line_ending: &'static [u8],
    /// Bytes between the last header and the body, normally the blank line
    separator: Vec<u8>,
    body: Vec<u8>,
}

impl RawMessage {
    /// Splits a raw message into its header fields and body
    ///
    /// Field boundaries come from mail-parser's offsets; every field keeps
    /// its original bytes.
    pub fn parse(raw: &[u8]) -> Result<Self, MailRelayError> {
        if raw.is_empty() {
            return Err(MailRelayError::EmailParsing("Empty message".to_string()));
        }

        let message = MessageParser::default()
            .parse(raw)
            .ok_or_else(|| MailRelayError::EmailParsing("Failed to parse email".to_string()))?;
        let root = message.root_part();

        let mut headers = Vec::with_capacity(root.headers().len());
        let mut prev_end = 0;
        for header in root.headers() {
            let end = (header.offset_end() as usize).clamp(prev_end, raw.len());
            let value_start = (header.offset_start() as usize).clamp(prev_end, end);

            // Stray bytes before a field stay attached to it
            headers.push(Header {
                name: header.name().to_string(),
                raw: raw[prev_end..end].to_vec(),
                value_start: value_start - prev_end,
            });
            prev_end = end;
        }

        let body_start = (root.raw_body_offset() as usize).clamp(prev_end, raw.len());

        Ok(Self {
            headers,
            line_ending: detect_line_ending(raw),
            separator: raw[prev_end..body_start].to_vec(),
            body: raw[body_start..].to_vec(),
        })
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// First value of the named header
    pub fn get(&self, name: &str) -> Option<String> {
        self.headers.iter().find(|h| h.is(name)).map(Header::value)
    }

    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.headers
            .iter()
            .filter(|h| h.is(name))
            .map(Header::value)
            .collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.headers.iter().filter(|h| h.is(name)).count()
    }

    /// Replaces the first occurrence in place and drops any others;
    /// appends the header when absent
    pub fn set(&mut self, name: &str, value: &str) {
        match self.headers.iter().position(|h| h.is(name)) {
            Some(index) => {
                self.headers[index] = Header::new(name, value, self.line_ending);
                let mut current = 0;
                self.headers.retain(|h| {
                    let keep = current == index || !h.is(name);
                    current += 1;
                    keep
                });
            }
            None => self.append(name, value),
        }
    }

    pub fn append(&mut self, name: &str, value: &str) {
        let line_ending = self.line_ending;
        if let Some(last) = self.headers.last_mut()
            && !last.ends_with_line_break()
        {
            last.raw.extend_from_slice(line_ending);
        }
        self.headers.push(Header::new(name, value, line_ending));
    }

    /// Removes every header matching `predicate`, returning how many were dropped
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Header) -> bool,
    {
        let before = self.headers.len();
        self.headers.retain(|h| !predicate(h));
        before - self.headers.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let header_len: usize = self.headers.iter().map(|h| h.raw.len()).sum();
        let mut out = Vec::with_capacity(header_len + self.separator.len() + self.body.len());

        for header in &self.headers {
            out.extend_from_slice(&header.raw);
        }
        out.extend_from_slice(&self.separator);
        out.extend_from_slice(&self.body);
        out
    }
}

/// Line ending of the first line, used for added headers
fn detect_line_ending(raw: &[u8]) -> &'static [u8] {
    match raw.iter().position(|&b| b == b'\n') {
        Some(pos) if pos > 0 && raw[pos - 1] == b'\r' => b"\r\n",
        Some(_) => b"\n",
        None => b"\r\n",
    }
}

fn line_break_len(raw: &[u8]) -> usize {
    if raw.ends_with(b"\r\n") {
        2
    } else if raw.ends_with(b"\n") {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &[u8] = b"From: Jane Doe <jane@example.com>\r\n\
To: me@mail.example.org\r\n\
Subject: Hello\r\n\
\r\n\
Body line 1\r\n\
Body line 2\r\n";

    #[test]
    fn test_parse_simple_message() {
        let message = RawMessage::parse(SIMPLE).unwrap();
        assert_eq!(message.headers().len(), 3);
        assert_eq!(
            message.get("from").as_deref(),
            Some("Jane Doe <jane@example.com>")
        );
        assert_eq!(message.get("Subject").as_deref(), Some("Hello"));
        assert_eq!(message.body(), b"Body line 1\r\nBody line 2\r\n");
    }

    #[test]
    fn test_round_trip_is_byte_exact() {
        assert_eq!(RawMessage::parse(SIMPLE).unwrap().to_bytes(), SIMPLE);

        let lf = b"From: a@b.com\nX-Custom:  spaced\tvalue \nSubject: x\n\nbody\n";
        assert_eq!(RawMessage::parse(lf).unwrap().to_bytes(), lf);
    }

    #[test]
    fn test_folded_header() {
        let raw = b"Subject: a very\r\n long subject\r\nDKIM-Signature: v=1; a=rsa-sha256;\r\n\td=example.com; s=sel;\r\n\r\nbody";
        let message = RawMessage::parse(raw).unwrap();

        assert_eq!(message.headers().len(), 2);
        assert_eq!(message.get("subject").as_deref(), Some("a very long subject"));
        assert_eq!(
            message.get("dkim-signature").as_deref(),
            Some("v=1; a=rsa-sha256;\td=example.com; s=sel;")
        );
        assert_eq!(message.to_bytes(), raw);
    }

    #[test]
    fn test_non_utf8_header_survives() {
        let raw = b"Subject: caf\xe9\r\nFrom: a@b.com\r\n\r\n\xff\xfe binary";
        let message = RawMessage::parse(raw).unwrap();
        assert_eq!(message.headers()[0].raw_value(), b" caf\xe9");
        assert_eq!(message.to_bytes(), raw);
    }

    #[test]
    fn test_set_replaces_and_dedups() {
        let raw = b"Received: one\r\nFrom: a@b.com\r\nTo: x@y.com\r\nfrom: c@d.com\r\n\r\nbody";
        let mut message = RawMessage::parse(raw).unwrap();

        message.set("From", "noreply@mail.example.org");
        assert_eq!(message.count("From"), 1);
        assert_eq!(message.headers()[1].name(), "From");
        assert_eq!(
            message.get("From").as_deref(),
            Some("noreply@mail.example.org")
        );
        assert_eq!(message.headers().len(), 3);
    }

    #[test]
    fn test_set_appends_when_absent() {
        let mut message = RawMessage::parse(SIMPLE).unwrap();
        message.set("Reply-To", "jane@example.com");

        assert_eq!(message.headers().last().unwrap().name(), "Reply-To");
        let bytes = message.to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Subject: Hello\r\nReply-To: jane@example.com\r\n\r\nBody line 1"));
    }

    #[test]
    fn test_remove_where() {
        let raw = b"DKIM-Signature: d=amazonses.com\r\nDKIM-Signature: d=example.com\r\n\r\n";
        let mut message = RawMessage::parse(raw).unwrap();

        let removed = message.remove_where(|h| h.is("dkim-signature") && h.value().contains("amazonses"));
        assert_eq!(removed, 1);
        assert_eq!(message.get_all("DKIM-Signature"), vec!["d=example.com"]);
    }

    #[test]
    fn test_missing_separator() {
        let raw = b"From: a@b.com\r\nSubject: no body";
        let mut message = RawMessage::parse(raw).unwrap();
        assert_eq!(message.headers().len(), 2);
        assert!(message.body().is_empty());
        assert_eq!(message.to_bytes(), raw);

        message.append("Reply-To", "c@d.com");
        assert_eq!(
            message.to_bytes(),
            b"From: a@b.com\r\nSubject: no body\r\nReply-To: c@d.com\r\n"
        );
    }

    #[test]
    fn test_stray_lines_are_preserved() {
        let raw = b"From: a@b.com\nthis is not a header\nmore\n";
        let message = RawMessage::parse(raw).unwrap();
        assert_eq!(message.headers().len(), 1);
        assert_eq!(message.get("From").as_deref(), Some("a@b.com"));
        assert_eq!(message.to_bytes(), raw);
    }

    #[test]
    fn test_lf_message_gets_lf_headers() {
        let raw = b"From: a@b.com\nSubject: x\n\nbody\n";
        let mut message = RawMessage::parse(raw).unwrap();
        message.set("Return-Path", "noreply@mail.example.org");
        assert_eq!(
            message.to_bytes(),
            b"From: a@b.com\nSubject: x\nReturn-Path: noreply@mail.example.org\n\nbody\n"
        );
    }

    #[test]
    fn test_empty_message_is_error() {
        assert!(matches!(
            RawMessage::parse(b""),
            Err(MailRelayError::EmailParsing(_))
        ));
    }
}
