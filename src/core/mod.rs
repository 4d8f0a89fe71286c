//! Post-enrichment processing.
//!
//! - [`filter`] - row selection by date range and sender
//! - [`stats`] - per-sender, per-hour and per-day aggregates
//! - [`output`] - format writers (CSV, JSON, JSONL, stats JSON)

pub mod filter;
pub mod output;
pub mod stats;

pub use filter::{FilterConfig, apply_filters};
pub use stats::{ChatStats, DayCount, SenderStats, WordCount};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{stats_to_json, to_json, to_jsonl, write_json, write_jsonl, write_stats_json};
