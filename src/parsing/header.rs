//! Message header recognition.
//!
//! Every message in an export starts with a non-indented line of the form
//!
//! ```text
//! Ivan Petrov (10:15:42  03/04/2021):
//! ```
//!
//! i.e. a sender label, a parenthesized time and date separated by exactly
//! two spaces, and a closing colon that ends the line. The same shape
//! indented with tabs marks the start of a forwarded message inside a body.

use std::sync::LazyLock;

use regex::Regex;

/// Top-level header: sender label, time, date. The label must start with a
/// non-whitespace character, so indented lookalikes never match.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S.*?)\s*\((\d{2}:\d{2}:\d{2})  (\d{2}/\d{2}/\d{4})\):$")
        .expect("header pattern is valid")
});

/// Tab-indented header lookalike embedded in a body.
static FORWARDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\t+\S.*\(\d{2}:\d{2}:\d{2}  \d{2}/\d{2}/\d{4}\):")
        .expect("forwarded marker pattern is valid")
});

/// Format of [`HeaderMatch::timestamp`], for chrono.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

/// Sender and timestamp extracted from a header line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderMatch {
    /// The full sender label, trimmed (nickname included if present).
    pub sender_name: String,
    /// First name token.
    pub first_name: String,
    /// Last name, when the label has more than one name token.
    pub last_name: Option<String>,
    /// Nickname from a trailing `[nick]` token.
    pub nickname: Option<String>,
    /// `HH:MM:SS DD/MM/YYYY`, single space between time and date.
    pub timestamp: String,
}

impl HeaderMatch {
    fn from_label(label: &str, time: &str, date: &str) -> Self {
        let sender_name = label.trim().to_string();
        let mut tokens: Vec<&str> = sender_name.split_whitespace().collect();

        let nickname = match tokens.last() {
            Some(last) if tokens.len() > 1 && is_nickname_token(last) => {
                let nick = last[1..last.len() - 1].to_string();
                tokens.pop();
                Some(nick)
            }
            _ => None,
        };

        let first_name = tokens.first().map(|t| (*t).to_string()).unwrap_or_default();
        let last_name = if tokens.len() > 1 {
            Some(tokens[1..].join(" "))
        } else {
            None
        };

        Self {
            sender_name,
            first_name,
            last_name,
            nickname,
            timestamp: format!("{time} {date}"),
        }
    }
}

fn is_nickname_token(token: &str) -> bool {
    token.len() > 2 && token.starts_with('[') && token.ends_with(']')
}

/// Tests a line against the header grammar.
///
/// The trailing line terminator (`\n` or `\r\n`) is ignored. Anything that
/// does not conform exactly, including header-shaped text preceded by
/// whitespace, returns `None`.
///
/// # Example
///
/// ```rust
/// use chatstats::parsing::match_header;
///
/// let header = match_header("Alice Smith (10:00:00  01/01/2020):\n").unwrap();
/// assert_eq!(header.first_name, "Alice");
/// assert_eq!(header.last_name.as_deref(), Some("Smith"));
/// assert_eq!(header.timestamp, "10:00:00 01/01/2020");
///
/// assert!(match_header("\tAlice (10:00:00  01/01/2020):").is_none());
/// ```
pub fn match_header(line: &str) -> Option<HeaderMatch> {
    let line = line.trim_end_matches(['\n', '\r']);
    let caps = HEADER_RE.captures(line)?;

    let label = caps.get(1).map_or("", |m| m.as_str());
    let time = caps.get(2).map_or("", |m| m.as_str());
    let date = caps.get(3).map_or("", |m| m.as_str());

    Some(HeaderMatch::from_label(label, time, date))
}

/// Returns `true` if the line is a top-level header.
pub fn is_header(line: &str) -> bool {
    HEADER_RE.is_match(line.trim_end_matches(['\n', '\r']))
}

/// Returns `true` if `text` contains a tab-indented header lookalike on any
/// of its lines. `text` must keep its original line breaks.
pub fn contains_forwarded_marker(text: &str) -> bool {
    FORWARDED_RE.is_match(text)
}
