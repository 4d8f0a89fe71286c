//! Body classification.
//!
//! Forwarded messages and attachments are replaced by fixed placeholders so
//! that downstream word statistics only see prose. Precedence is
//! forwarded → attachment → plain.

use serde::{Deserialize, Serialize};

use super::header::contains_forwarded_marker;
use super::segment::RawMessage;

/// Placeholder text that replaces a forwarded message body.
pub const FORWARDED_PLACEHOLDER: &str = "Пересланное сообщение";

/// Literal marker for attachments; also the canonical text of an
/// attachment message.
pub const ATTACHMENT_MARKER: &str = "Attachment";

/// What a message body turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Forwarded,
    Attachment,
    Plain,
}

/// Classification result: kind plus canonical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: MessageKind,
    pub text: String,
}

/// Classifies a segmented message.
pub fn classify(msg: &RawMessage) -> Classified {
    classify_body(&msg.raw_body())
}

/// Classifies a body given in its newline-joined form.
///
/// # Example
///
/// ```rust
/// use chatstats::parsing::{classify_body, MessageKind, ATTACHMENT_MARKER};
///
/// let c = classify_body("Attachment: photo.jpg");
/// assert_eq!(c.kind, MessageKind::Attachment);
/// assert_eq!(c.text, ATTACHMENT_MARKER);
///
/// let c = classify_body("  hello\nthere  ");
/// assert_eq!(c.kind, MessageKind::Plain);
/// assert_eq!(c.text, "hello there");
/// ```
pub fn classify_body(raw_body: &str) -> Classified {
    if contains_forwarded_marker(raw_body) {
        return Classified {
            kind: MessageKind::Forwarded,
            text: FORWARDED_PLACEHOLDER.to_string(),
        };
    }

    if raw_body.contains(ATTACHMENT_MARKER) {
        return Classified {
            kind: MessageKind::Attachment,
            text: ATTACHMENT_MARKER.to_string(),
        };
    }

    let flattened = raw_body.replace('\n', " ");
    Classified {
        kind: MessageKind::Plain,
        text: flattened.trim().to_string(),
    }
}
