//! Incremental reader for large exports.
//!
//! [`ExportStream`] reads the export line by line and runs the same
//! [`SegmentMachine`] as the in-memory path, so both produce identical
//! messages. Memory stays bounded by the longest single message.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use chatstats::streaming::ExportStream;
//!
//! let text = "Alice (10:00:00  01/01/2020):\nhi\nBob (10:00:01  01/01/2020):\nhey\n";
//! let stream = ExportStream::new(Cursor::new(text), Some(text.len() as u64));
//!
//! let messages: Vec<_> = stream.collect::<chatstats::Result<_>>().unwrap();
//! assert_eq!(messages.len(), 2);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::config::ExportConfig;
use crate::error::{ChatstatsError, Result};
use crate::parsing::{RawMessage, SegmentMachine};

/// Iterator of [`RawMessage`]s read from a [`BufRead`].
pub struct ExportStream<R: BufRead> {
    reader: R,
    total_bytes: Option<u64>,
    bytes_read: u64,
    line_buffer: String,
    machine: SegmentMachine,
    finished: bool,
}

impl ExportStream<BufReader<File>> {
    /// Opens `path` with the buffer size from `config`.
    pub fn open(path: impl AsRef<Path>, config: &ExportConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ChatstatsError::input_not_found(path),
            _ => e.into(),
        })?;
        let size = file.metadata()?.len();
        debug!(path = %path.display(), bytes = size, "streaming export");

        let reader = BufReader::with_capacity(config.buffer_size, file);
        Ok(Self::new(reader, Some(size)))
    }
}

impl<R: BufRead> ExportStream<R> {
    /// Wraps a reader; `total_bytes` enables [`progress`](Self::progress).
    pub fn new(reader: R, total_bytes: Option<u64>) -> Self {
        Self {
            reader,
            total_bytes,
            bytes_read: 0,
            line_buffer: String::with_capacity(4096),
            machine: SegmentMachine::new(),
            finished: false,
        }
    }

    /// Percentage of input consumed, if the total size is known.
    pub fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) | None => None,
            Some(total) => Some((self.bytes_read as f64 / total as f64) * 100.0),
        }
    }

    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Lines read so far.
    pub fn lines_seen(&self) -> usize {
        self.machine.lines_seen()
    }

    fn read_line(&mut self) -> std::io::Result<bool> {
        self.line_buffer.clear();
        let bytes = self.reader.read_line(&mut self.line_buffer)?;
        self.bytes_read += bytes as u64;
        Ok(bytes > 0)
    }
}

impl<R: BufRead> Iterator for ExportStream<R> {
    type Item = Result<RawMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.read_line() {
                Ok(true) => {
                    if let Some(msg) = self.machine.feed(&self.line_buffer) {
                        return Some(Ok(msg));
                    }
                }
                Ok(false) => {
                    self.finished = true;
                    return self.machine.finish().map(Ok);
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
