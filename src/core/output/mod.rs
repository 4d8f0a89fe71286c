//! Output writers for the enriched table.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of rows - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one row per line - requires `json-output` feature
//! - [`write_stats_json`] / [`stats_to_json`] - aggregates from [`ChatStats`](crate::core::stats::ChatStats) - requires `json-output` feature
//!
//! Every format carries the same columns in the same order:
//! `name, message, message_len, emojis, year, month, day, hour, minute, second`.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::core::output::{to_csv, write_json, write_jsonl};
//! use chatstats::config::PipelineConfig;
//! use chatstats::normalize::StopwordSet;
//! use chatstats::pipeline::Pipeline;
//!
//! let stopwords = StopwordSet::load("data/stopwords")?;
//! let output = Pipeline::new(PipelineConfig::new(), &stopwords).run_path("chat.txt")?;
//!
//! write_json(&output.table, "chat.json")?;
//! write_jsonl(&output.table, "chat.jsonl")?;
//! let csv_string = to_csv(&output.table)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
#[cfg(feature = "json-output")]
mod stats_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv, write_csv_to};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl, write_jsonl_to};
#[cfg(feature = "json-output")]
pub use stats_writer::{stats_to_json, write_stats_json};
