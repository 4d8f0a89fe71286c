//! Output format selection.
//!
//! Library-level format types with no CLI framework dependency.
//!
//! # Example
//!
//! ```rust
//! use chatstats::format::OutputFormat;
//!
//! let format = OutputFormat::from_path("output.jsonl").unwrap();
//! assert_eq!(format, OutputFormat::Jsonl);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enrich::EnrichedTable;
use crate::error::{ChatstatsError, Result};

/// Output format for the enriched table.
///
/// ```rust
/// use chatstats::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-delimited CSV with a header row (default)
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines, one row object per line
    Jsonl,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Detects the format from a file extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatstatsError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )),
        }
    }

    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn feature_disabled(format: OutputFormat) -> ChatstatsError {
    ChatstatsError::invalid_format(
        "output",
        format!(
            "Output format {format} requires the '{}' feature to be enabled",
            format.feature()
        ),
    )
}

/// Writes the table to `path` in `format`.
///
/// # Errors
///
/// Fails if the file cannot be written or the format's feature is disabled.
#[allow(unused_variables)]
pub fn write_to_format(
    table: &EnrichedTable,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(table, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(table, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(table, path),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders the table as a string in `format`.
#[allow(unused_variables)]
pub fn to_format_string(table: &EnrichedTable, format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(table),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(table),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(table),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}
