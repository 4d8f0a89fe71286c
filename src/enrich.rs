//! Derived columns for the message table.
//!
//! [`Enricher`] turns a [`MessageTable`] into an [`EnrichedTable`]:
//!
//! 1. every `date` is parsed as `HH:MM:SS DD/MM/YYYY`; one failure aborts
//!    the run with [`ChatstatsError::MalformedTimestamp`]
//! 2. every distinct message text is normalized once, on the calling
//!    thread, through the [`NormalizationCache`]
//! 3. rows are built in parallel on a fixed-size rayon pool, reading the
//!    precomputed normalizations, and gathered back in input order
//!
//! `message_len` and `emojis` are measured on the text *before*
//! normalization; the enriched row keeps only the normalized text.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDateTime, Timelike};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EnrichConfig;
use crate::error::{ChatstatsError, Result};
use crate::normalize::{NormalizationCache, Normalizer, StopwordSet};
use crate::parsing::TIMESTAMP_FORMAT;
use crate::table::{MessageTable, RawRow};

/// Column names of the enriched table, in output order.
pub const COLUMNS: [&str; 10] = [
    "name",
    "message",
    "message_len",
    "emojis",
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
];

// One match per rendered glyph: keycaps, flag pairs, and pictographs with
// their variation selectors, skin tones and ZWJ continuations.
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[0-9#*]\x{FE0F}?\x{20E3}|[\x{1F1E6}-\x{1F1FF}]{2}|\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier})*(?:\x{200D}\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier})*)*",
    )
    .expect("emoji pattern is valid")
});

/// Counts emoji glyphs in `text`.
///
/// ```rust
/// use chatstats::enrich::count_emojis;
///
/// assert_eq!(count_emojis("Hello 👋 World 🌍"), 2);
/// assert_eq!(count_emojis("no emoji here 123"), 0);
/// ```
pub fn count_emojis(text: &str) -> usize {
    EMOJI_RE.find_iter(text).count()
}

/// Parses a table date string.
pub fn parse_timestamp(date: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT).ok()
}

/// A fully enriched message.
///
/// Serializes to exactly the [`COLUMNS`]; the parsed `timestamp` is kept
/// for filtering but is not an output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRow {
    #[serde(skip)]
    pub timestamp: NaiveDateTime,
    pub name: String,
    /// Normalized text.
    pub message: String,
    /// Character count of the original text.
    pub message_len: usize,
    /// Emoji count of the original text.
    pub emojis: usize,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl MessageRow {
    fn build(timestamp: NaiveDateTime, raw: &RawRow, normalized: String) -> Self {
        Self {
            timestamp,
            name: raw.name.clone(),
            message: normalized,
            message_len: raw.message.chars().count(),
            emojis: count_emojis(&raw.message),
            year: timestamp.year(),
            month: timestamp.month(),
            day: timestamp.day(),
            hour: timestamp.hour(),
            minute: timestamp.minute(),
            second: timestamp.second(),
        }
    }
}

/// Ordered collection of [`MessageRow`]s handed to output and statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnrichedTable {
    rows: Vec<MessageRow>,
}

impl EnrichedTable {
    pub fn new(rows: Vec<MessageRow>) -> Self {
        Self { rows }
    }

    pub fn columns() -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[MessageRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRow> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<MessageRow> {
        self.rows
    }
}

impl FromIterator<MessageRow> for EnrichedTable {
    fn from_iter<T: IntoIterator<Item = MessageRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EnrichedTable {
    type Item = &'a MessageRow;
    type IntoIter = std::slice::Iter<'a, MessageRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Computes derived columns for a message table.
///
/// # Example
///
/// ```rust
/// use chatstats::config::EnrichConfig;
/// use chatstats::enrich::Enricher;
/// use chatstats::normalize::StopwordSet;
/// use chatstats::table::{MessageTable, RawRow};
///
/// # fn main() -> chatstats::Result<()> {
/// let stopwords = StopwordSet::from_words(["the"]);
/// let enricher = Enricher::new(&stopwords, EnrichConfig::new().with_workers(2));
///
/// let table: MessageTable = vec![RawRow::new("10:00:00 01/01/2020", "Alice", "The hello world")]
///     .into_iter()
///     .collect();
/// let enriched = enricher.enrich(&table)?;
///
/// assert_eq!(enriched.rows()[0].message, "hello world");
/// assert_eq!(enriched.rows()[0].message_len, 15);
/// assert_eq!(enriched.rows()[0].year, 2020);
/// # Ok(())
/// # }
/// ```
pub struct Enricher<'a> {
    normalizer: Normalizer<'a>,
    config: EnrichConfig,
}

impl<'a> Enricher<'a> {
    pub fn new(stopwords: &'a StopwordSet, config: EnrichConfig) -> Self {
        Self {
            normalizer: Normalizer::new(stopwords),
            config,
        }
    }

    pub fn config(&self) -> &EnrichConfig {
        &self.config
    }

    /// Enriches `table` with a fresh cache sized from the configuration.
    pub fn enrich(&self, table: &MessageTable) -> Result<EnrichedTable> {
        let mut cache = NormalizationCache::with_capacity(self.config.cache_capacity);
        self.enrich_with_cache(table, &mut cache)
    }

    /// Enriches `table`, reusing (and filling) `cache`.
    pub fn enrich_with_cache(
        &self,
        table: &MessageTable,
        cache: &mut NormalizationCache,
    ) -> Result<EnrichedTable> {
        let rows = table.rows();
        let timestamps = parse_timestamps(rows)?;
        let normalized = self.precompute(rows, cache);

        let workers = self.config.worker_count();
        debug!(rows = rows.len(), workers, "enriching rows");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let enriched: Vec<MessageRow> = pool.install(|| {
            rows.par_iter()
                .zip(timestamps.par_iter())
                .map(|(raw, &ts)| {
                    let text = normalized
                        .get(raw.message.as_str())
                        .cloned()
                        .unwrap_or_else(|| self.normalizer.normalize(&raw.message));
                    MessageRow::build(ts, raw, text)
                })
                .collect()
        });

        info!(
            rows = enriched.len(),
            distinct = normalized.len(),
            cache_hits = cache.hits(),
            cache_misses = cache.misses(),
            "enrichment complete"
        );

        Ok(EnrichedTable::new(enriched))
    }

    /// Normalizes each distinct message once, single-threaded, via the cache.
    fn precompute<'r>(
        &self,
        rows: &'r [RawRow],
        cache: &mut NormalizationCache,
    ) -> HashMap<&'r str, String> {
        let mut normalized: HashMap<&'r str, String> = HashMap::new();
        for row in rows {
            let text = row.message.as_str();
            if !normalized.contains_key(text) {
                let value = self.normalizer.normalize_cached(text, cache);
                normalized.insert(text, value);
            }
        }
        normalized
    }
}

/// Parses every row's date, failing on the first malformed one.
fn parse_timestamps(rows: &[RawRow]) -> Result<Vec<NaiveDateTime>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            parse_timestamp(&row.date).ok_or_else(|| ChatstatsError::malformed_timestamp(i, &row.date))
        })
        .collect()
}
