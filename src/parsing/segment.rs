//! Message boundary recovery.
//!
//! The export has no explicit delimiters: a message ends where the next
//! top-level header begins. [`SegmentMachine`] holds the scan state and
//! exposes the flush point as a single transition ([`SegmentMachine::feed`]
//! returning the completed record). [`Segmenter`] drives it over any line
//! iterator and yields [`RawMessage`]s lazily.

use tracing::warn;

use super::header::{HeaderMatch, match_header};

/// A message as recovered from the line stream, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// Header fields of this message.
    pub header: HeaderMatch,
    /// Body lines in input order, without line terminators.
    pub body_lines: Vec<String>,
}

impl RawMessage {
    /// Creates a message with an empty body.
    pub fn new(header: HeaderMatch) -> Self {
        Self {
            header,
            body_lines: Vec::new(),
        }
    }

    /// Body lines joined with single spaces (the stored form).
    pub fn body(&self) -> String {
        self.body_lines.join(" ")
    }

    /// Body lines joined with newlines (the form used for forwarded-message
    /// detection).
    pub fn raw_body(&self) -> String {
        self.body_lines.join("\n")
    }
}

/// Scan state.
#[derive(Debug, Default)]
enum SegmentState {
    /// No header seen yet.
    #[default]
    AwaitingHeader,
    /// Inside a message; the record is open.
    AccumulatingBody(RawMessage),
}

/// Finite-state scanner over export lines.
#[derive(Debug, Default)]
pub struct SegmentMachine {
    state: SegmentState,
    lines_seen: usize,
    orphaned_lines: usize,
}

impl SegmentMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line. Returns the previous message when `line` is a header
    /// that closes it.
    pub fn feed(&mut self, line: &str) -> Option<RawMessage> {
        self.lines_seen += 1;
        let line = line.trim_end_matches(['\n', '\r']);

        if let Some(header) = match_header(line) {
            let previous = std::mem::replace(
                &mut self.state,
                SegmentState::AccumulatingBody(RawMessage::new(header)),
            );
            return match previous {
                SegmentState::AccumulatingBody(msg) => Some(msg),
                SegmentState::AwaitingHeader => None,
            };
        }

        match &mut self.state {
            SegmentState::AccumulatingBody(msg) => msg.body_lines.push(line.to_string()),
            SegmentState::AwaitingHeader => self.orphaned_lines += 1,
        }
        None
    }

    /// Ends the stream, returning the last open message.
    pub fn finish(&mut self) -> Option<RawMessage> {
        if self.orphaned_lines > 0 {
            warn!(
                lines = self.orphaned_lines,
                "export does not start with a message header; leading lines dropped"
            );
        }
        match std::mem::take(&mut self.state) {
            SegmentState::AccumulatingBody(msg) => Some(msg),
            SegmentState::AwaitingHeader => None,
        }
    }

    /// Number of lines fed so far.
    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Lines that appeared before the first header.
    pub fn orphaned_lines(&self) -> usize {
        self.orphaned_lines
    }

    /// Returns `true` while a message is open.
    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, SegmentState::AccumulatingBody(_))
    }
}

/// Lazy iterator of [`RawMessage`]s over a sequence of lines.
///
/// # Example
///
/// ```rust
/// use chatstats::parsing::Segmenter;
///
/// let text = "Alice (10:00:00  01/01/2020):\nhello\nworld\nBob (10:00:01  01/01/2020):\nhi\n";
/// let messages: Vec<_> = Segmenter::new(text.lines()).collect();
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].body(), "hello world");
/// ```
pub struct Segmenter<I> {
    lines: I,
    machine: SegmentMachine,
    finished: bool,
}

impl<I> Segmenter<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            machine: SegmentMachine::new(),
            finished: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_seen(&self) -> usize {
        self.machine.lines_seen()
    }
}

impl<I, S> Iterator for Segmenter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = RawMessage;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            if let Some(msg) = self.machine.feed(line.as_ref()) {
                return Some(msg);
            }
        }

        self.finished = true;
        self.machine.finish()
    }
}

/// Segments a whole export held in memory.
pub fn segment(text: &str) -> Vec<RawMessage> {
    Segmenter::new(text.lines()).collect()
}
