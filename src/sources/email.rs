// src/sources/email.rs
use crate::sources::models::EmailParts;
use crate::utils::error::SourceError;
use mail_parser::MessageParser;
use std::fs;
use std::path::Path;

/// Reads an RFC 5322 message from disk.
pub fn read_email(path: &Path) -> Result<EmailParts, SourceError> {
    let content = fs::read(path)?;
    parse_email(&content).ok_or_else(|| SourceError::Decode {
        path: path.to_path_buf(),
        reason: "not a parseable email message".to_string(),
    })
}

/// Splits a message into Date header, Subject and all plain-text bodies.
pub fn parse_email(content: &[u8]) -> Option<EmailParts> {
    let message = MessageParser::default().parse(content)?;

    let date = message
        .header_raw("Date")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let subject = message.subject().map(|value| value.to_string());

    let body = (0..)
        .map_while(|index| message.body_text(index))
        .collect::<Vec<_>>()
        .join("\n");

    Some(EmailParts {
        date,
        subject,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = "From: Events <events@example.com>\r\n\
To: you@example.com\r\n\
Subject: Save the date: March 5, 2026\r\n\
Date: Thu, 15 Jan 2026 09:30:00 +0000\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Doors open 7th - 8th March 2026.\r\n";

    #[test]
    fn test_parse_email_parts() {
        let parts = parse_email(MESSAGE.as_bytes()).expect("message should parse");
        assert_eq!(parts.subject.as_deref(), Some("Save the date: March 5, 2026"));
        assert!(parts.date.as_deref().is_some_and(|d| d.contains("15 Jan 2026")));
        assert!(parts.body.contains("7th - 8th March 2026"));
    }
}
