//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - clap-facing format option, convertible to
//!   [`format::OutputFormat`](crate::format::OutputFormat)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_STOPWORDS_PATH, EnrichConfig, ExportConfig, PipelineConfig};
use crate::core::filter::FilterConfig;
use crate::error::Result;
use crate::normalize::DEFAULT_CACHE_CAPACITY;

/// Default output file name; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "chat_stats.csv";

/// Extract messages from a plain-text chat export into an enriched table
/// (sender, normalized text, length, emoji count, date parts).
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats chat.txt
    chatstats chat.txt -o table.jsonl -f jsonl
    chatstats chat.txt --after 2021-01-01 --from \"Ivan Petrov\"
    chatstats big_chat.txt --streaming --workers 8 --stats stats.json")]
pub struct Args {
    /// Path to the chat export
    pub input: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Stopword resource (whitespace-separated words)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STOPWORDS_PATH)]
    pub stopwords: PathBuf,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this sender; repeat to select several
    #[arg(long, value_name = "NAME")]
    pub from: Vec<String>,

    /// Enrichment worker threads (default: one per CPU)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Normalization cache capacity
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// Read the export incrementally
    #[arg(long)]
    pub streaming: bool,

    /// Also write aggregate statistics as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub stats: Option<PathBuf>,

    /// Log progress (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Pipeline configuration described by these arguments.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let export = if self.streaming {
            ExportConfig::streaming()
        } else {
            ExportConfig::new()
        };

        let mut enrich = EnrichConfig::new().with_cache_capacity(self.cache_capacity);
        if let Some(workers) = self.workers {
            enrich = enrich.with_workers(workers);
        }

        PipelineConfig::new()
            .with_export(export)
            .with_enrich(enrich)
            .with_stopwords_path(&self.stopwords)
    }

    /// Row filter described by these arguments.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new().with_senders(self.from.iter().cloned());
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }

    /// Output path, with the extension switched to match `--format` when
    /// the default name is in use.
    pub fn output_path(&self) -> PathBuf {
        if self.output.as_os_str() != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let format: crate::format::OutputFormat = self.format.into();
        self.output.with_extension(format.extension())
    }

    /// Default log filter directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines - one row object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
