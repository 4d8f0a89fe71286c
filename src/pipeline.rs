//! End-to-end run: export text in, enriched table out.
//!
//! ```text
//! lines ─▶ Segmenter ─▶ classify ─▶ MessageTable ─▶ Enricher ─▶ EnrichedTable
//! ```
//!
//! A run either produces the whole table or fails; no partial result is
//! returned.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::enrich::{EnrichedTable, Enricher};
use crate::error::{ChatstatsError, Result};
use crate::normalize::{NormalizationCache, StopwordSet};
use crate::parsing::{MessageKind, RawMessage, Segmenter, classify};
use crate::table::{MessageTable, RawRow};

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Input lines read.
    pub lines: usize,
    /// Messages recovered (= top-level headers).
    pub messages: usize,
    pub forwarded: usize,
    pub attachments: usize,
    pub plain: usize,
    /// Distinct message texts after classification.
    pub distinct_texts: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl PipelineStats {
    fn count(&mut self, kind: MessageKind) {
        self.messages += 1;
        match kind {
            MessageKind::Forwarded => self.forwarded += 1,
            MessageKind::Attachment => self.attachments += 1,
            MessageKind::Plain => self.plain += 1,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub table: EnrichedTable,
    pub stats: PipelineStats,
}

/// Runs the full extraction and enrichment pipeline.
///
/// # Example
///
/// ```rust
/// use chatstats::config::PipelineConfig;
/// use chatstats::normalize::StopwordSet;
/// use chatstats::pipeline::Pipeline;
///
/// # fn main() -> chatstats::Result<()> {
/// let export = "\
/// Alice (10:00:00  01/01/2020):
/// hello world
/// Bob (10:00:05  01/01/2020):
/// Attachment: photo.jpg
/// ";
/// let stopwords = StopwordSet::from_words(["world"]);
/// let output = Pipeline::new(PipelineConfig::new(), &stopwords).run_str(export)?;
///
/// assert_eq!(output.table.len(), 2);
/// assert_eq!(output.table.rows()[0].message, "hello");
/// assert_eq!(output.table.rows()[1].message, "Attachment");
/// assert_eq!(output.stats.attachments, 1);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<'a> {
    config: PipelineConfig,
    stopwords: &'a StopwordSet,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: PipelineConfig, stopwords: &'a StopwordSet) -> Self {
        Self { config, stopwords }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs on an export file with a fresh cache.
    pub fn run_path(&self, path: impl AsRef<Path>) -> Result<PipelineOutput> {
        let mut cache = self.new_cache();
        self.run_path_with_cache(path, &mut cache)
    }

    /// Runs on an export file, reusing `cache`.
    ///
    /// Reads incrementally when [`ExportConfig::streaming`](crate::config::ExportConfig)
    /// is set and the `streaming` feature is enabled.
    pub fn run_path_with_cache(
        &self,
        path: impl AsRef<Path>,
        cache: &mut NormalizationCache,
    ) -> Result<PipelineOutput> {
        let path = path.as_ref();
        info!(path = %path.display(), streaming = self.config.export.streaming, "reading export");

        #[cfg(feature = "streaming")]
        if self.config.export.streaming {
            let mut stream = crate::streaming::ExportStream::open(path, &self.config.export)?;
            let (table, mut stats) = tabulate(stream.by_ref())?;
            stats.lines = stream.lines_seen();
            return self.finish(&table, stats, cache);
        }

        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ChatstatsError::input_not_found(path),
            _ => e.into(),
        })?;
        self.run_with_cache(&text, cache)
    }

    /// Runs on export text held in memory, with a fresh cache.
    pub fn run_str(&self, text: &str) -> Result<PipelineOutput> {
        let mut cache = self.new_cache();
        self.run_with_cache(text, &mut cache)
    }

    /// Runs on export text held in memory, reusing `cache`.
    pub fn run_with_cache(
        &self,
        text: &str,
        cache: &mut NormalizationCache,
    ) -> Result<PipelineOutput> {
        let mut segmenter = Segmenter::new(text.lines());
        let (table, mut stats) = tabulate(segmenter.by_ref().map(Ok))?;
        stats.lines = segmenter.lines_seen();
        self.finish(&table, stats, cache)
    }

    fn finish(
        &self,
        table: &MessageTable,
        mut stats: PipelineStats,
        cache: &mut NormalizationCache,
    ) -> Result<PipelineOutput> {
        debug!(
            lines = stats.lines,
            messages = stats.messages,
            forwarded = stats.forwarded,
            attachments = stats.attachments,
            "segmentation complete"
        );

        let (hits, misses) = (cache.hits(), cache.misses());
        let enriched = Enricher::new(self.stopwords, self.config.enrich)
            .enrich_with_cache(table, cache)?;

        stats.distinct_texts = distinct_texts(table);
        stats.cache_hits = cache.hits() - hits;
        stats.cache_misses = cache.misses() - misses;

        info!(rows = enriched.len(), "pipeline complete");
        Ok(PipelineOutput {
            table: enriched,
            stats,
        })
    }

    fn new_cache(&self) -> NormalizationCache {
        NormalizationCache::with_capacity(self.config.enrich.cache_capacity)
    }
}

/// Classifies each message into a table row, counting kinds.
fn tabulate<I>(messages: I) -> Result<(MessageTable, PipelineStats)>
where
    I: Iterator<Item = Result<RawMessage>>,
{
    let mut stats = PipelineStats::default();
    let mut table = MessageTable::new();

    for msg in messages {
        let msg = msg?;
        let classified = classify(&msg);
        stats.count(classified.kind);
        table.push(RawRow::from_classified(msg, classified));
    }

    Ok((table, stats))
}

fn distinct_texts(table: &MessageTable) -> usize {
    table
        .iter()
        .map(|row| row.message.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnrichConfig, ExportConfig};
    use crate::parsing::{ATTACHMENT_MARKER, FORWARDED_PLACEHOLDER};

    const EXPORT: &str = "\
Ivan Petrov (10:15:42  03/04/2021):
Hello there
Maria (10:16:00  03/04/2021):
\tIvan Petrov (09:00:00  01/04/2021):
\tAttachment
Ivan Petrov (10:17:00  03/04/2021):
Attachment
Maria (10:18:00  03/04/2021):
Hello there
";

    fn run(text: &str) -> Result<PipelineOutput> {
        let stopwords = StopwordSet::from_words(["there"]);
        Pipeline::new(PipelineConfig::new(), &stopwords).run_str(text)
    }

    #[test]
    fn test_counts_and_rows() {
        let out = run(EXPORT).unwrap();
        assert_eq!(out.table.len(), 4);
        assert_eq!(
            out.stats,
            PipelineStats {
                lines: 9,
                messages: 4,
                forwarded: 1,
                attachments: 1,
                plain: 2,
                distinct_texts: 3,
                cache_hits: 0,
                cache_misses: 3,
            }
        );

        let rows = out.table.rows();
        assert_eq!(rows[0].name, "Ivan Petrov");
        assert_eq!(rows[0].message, "hello");
        assert_eq!(rows[0].message_len, 11);
        assert_eq!(rows[1].message, FORWARDED_PLACEHOLDER);
        assert_eq!(rows[2].message, ATTACHMENT_MARKER);
    }

    #[test]
    fn test_cache_reused_across_runs() {
        let stopwords = StopwordSet::new();
        let pipeline = Pipeline::new(PipelineConfig::new(), &stopwords);
        let mut cache = NormalizationCache::new();

        let first = pipeline.run_with_cache(EXPORT, &mut cache).unwrap();
        let second = pipeline.run_with_cache(EXPORT, &mut cache).unwrap();

        assert_eq!(first.table, second.table);
        assert_eq!(second.stats.cache_misses, 0);
        assert_eq!(second.stats.cache_hits, 3);
    }

    #[test]
    fn test_malformed_timestamp_fails_run() {
        let err = run("Alice (99:99:99  00/00/0000):\nhi\n").unwrap_err();
        assert!(err.is_malformed_timestamp());
    }

    #[test]
    fn test_empty_input() {
        let out = run("").unwrap();
        assert!(out.table.is_empty());
        assert_eq!(out.stats.messages, 0);
    }

    #[test]
    fn test_missing_file() {
        let stopwords = StopwordSet::new();
        let err = Pipeline::new(PipelineConfig::new(), &stopwords)
            .run_path("/no/such/export.txt")
            .unwrap_err();
        assert!(err.is_input_not_found());
    }

    #[test]
    fn test_file_and_streaming_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        std::fs::write(&path, EXPORT).unwrap();

        let stopwords = StopwordSet::new();
        let enrich = EnrichConfig::new().with_workers(2);
        let in_memory = Pipeline::new(PipelineConfig::new().with_enrich(enrich), &stopwords)
            .run_path(&path)
            .unwrap();
        let streamed = Pipeline::new(
            PipelineConfig::new()
                .with_enrich(enrich)
                .with_export(ExportConfig::streaming()),
            &stopwords,
        )
        .run_path(&path)
        .unwrap();

        assert_eq!(in_memory, streamed);
    }
}
