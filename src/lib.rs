//! # chatstats
//!
//! Extracts messages from plain-text chat exports and turns them into an
//! enriched, analysis-ready table.
//!
//! ## Overview
//!
//! An export is a sequence of messages, each introduced by a header line
//!
//! ```text
//! Ivan Petrov (10:15:42  03/04/2021):
//! ```
//!
//! followed by zero or more body lines. chatstats recovers message
//! boundaries, tags forwarded messages and attachments, and computes per
//! row: normalized text, character length, emoji count and the six date
//! components.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig::new();
//!     let stopwords = StopwordSet::load(&config.stopwords_path)?;
//!
//!     let output = Pipeline::new(config, &stopwords).run_path("chat.txt")?;
//!     write_csv(&output.table, "chat.csv")?;
//!
//!     let stats = ChatStats::from_rows(output.table.rows());
//!     println!("{} senders", stats.senders.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - header grammar, segmentation state machine, classification
//! - [`table`] - [`MessageTable`](table::MessageTable) of raw `date`/`name`/`message` rows
//! - [`normalize`] - stopword set, normalizer and its LRU cache
//! - [`enrich`] - parallel computation of derived columns
//! - [`pipeline`] - the end-to-end run with counters
//! - [`streaming`] - incremental reader for large exports (feature `streaming`)
//! - [`core`] - filtering, statistics and output writers
//! - [`format`] - output format selection
//! - [`config`] - serde-friendly configuration structs
//! - [`cli`] - clap argument definitions (feature `cli`)
//! - [`error`] - [`ChatstatsError`] and [`Result`]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod enrich;
pub mod error;
pub mod format;
pub mod normalize;
pub mod parsing;
pub mod pipeline;
#[cfg(feature = "streaming")]
pub mod streaming;
pub mod table;

pub use error::{ChatstatsError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ChatstatsError, Result};

    pub use crate::config::{EnrichConfig, ExportConfig, PipelineConfig};

    pub use crate::parsing::{MessageKind, RawMessage, Segmenter, classify, segment};
    pub use crate::table::{MessageTable, RawRow};

    pub use crate::normalize::{NormalizationCache, Normalizer, StopwordSet};
    pub use crate::enrich::{EnrichedTable, Enricher, MessageRow};
    pub use crate::pipeline::{Pipeline, PipelineOutput, PipelineStats};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::stats::ChatStats;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl, write_stats_json};

    pub use crate::format::{OutputFormat, write_to_format};
}
