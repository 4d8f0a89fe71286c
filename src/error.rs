//! Unified error types for chatstats.
//!
//! Every fallible operation in the library returns [`ChatstatsError`]. The
//! pipeline is all-or-nothing: a structural failure (missing input, missing
//! stopword resource, an unparseable timestamp) aborts the run and no partial
//! table is produced.
//!
//! Note that a *near-miss* header line is not an error at all. Lines that
//! almost match the header grammar are folded into the current message body.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::table::MessageTable;
///
/// fn build() -> Result<MessageTable> {
///     Ok(MessageTable::new())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The chat export file does not exist.
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// The stopword resource could not be found.
    ///
    /// The normalizer cannot run without its filter set, so this is fatal.
    #[error("Stopword resource not found: {}", path.display())]
    StopwordResourceMissing {
        /// The path that was requested
        path: PathBuf,
    },

    /// A segmented message carries a date string that does not match
    /// `HH:MM:SS DD/MM/YYYY`.
    ///
    /// This almost always means message boundaries were recovered
    /// incorrectly, so the whole enrichment pass is aborted.
    #[error("Malformed timestamp '{input}' in row {row}. Expected format: HH:MM:SS DD/MM/YYYY")]
    MalformedTimestamp {
        /// Zero-based index of the offending row
        row: usize,
        /// The date string as it appeared in the table
        input: String,
    },

    /// Invalid date in a filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A value does not match the expected structure (e.g. an unknown
    /// output file extension).
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What was being interpreted
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The enrichment worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates an input-not-found error.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        ChatstatsError::InputNotFound { path: path.into() }
    }

    /// Creates a stopword-resource-missing error.
    pub fn stopwords_missing(path: impl Into<PathBuf>) -> Self {
        ChatstatsError::StopwordResourceMissing { path: path.into() }
    }

    /// Creates a malformed timestamp error for the given row.
    pub fn malformed_timestamp(row: usize, input: impl Into<String>) -> Self {
        ChatstatsError::MalformedTimestamp {
            row,
            input: input.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatsError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// Returns `true` if the input file was missing.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, ChatstatsError::InputNotFound { .. })
    }

    /// Returns `true` if the stopword resource was missing.
    pub fn is_stopwords_missing(&self) -> bool {
        matches!(self, ChatstatsError::StopwordResourceMissing { .. })
    }

    /// Returns `true` if a timestamp failed to parse.
    pub fn is_malformed_timestamp(&self) -> bool {
        matches!(self, ChatstatsError::MalformedTimestamp { .. })
    }

    /// Returns `true` if this is a date-related filter error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatsError::InvalidDate { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatstatsError::InvalidFormat { .. })
    }
}
