//! Aggregates over an enriched table.
//!
//! These are the numbers a report renders: who wrote how much, when the
//! chat is active, and which words each person uses most. Rendering itself
//! happens elsewhere; [`ChatStats`] serializes to JSON for that purpose.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::enrich::MessageRow;
use crate::normalize::URL_MARKER;

/// Words shorter than this (in characters) are not counted.
pub const MIN_WORD_LEN: usize = 4;

/// Entries kept in each most-common-words list.
pub const TOP_WORDS: usize = 30;

// Lowercased substrings that exclude a message from word counts.
const SKIP_MARKERS: [&str; 3] = ["пересланное", "attachment", URL_MARKER];

/// One word and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Message count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub count: usize,
}

/// Totals for one sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderStats {
    pub name: String,
    pub messages: usize,
    /// Sum of `message_len`.
    pub chars: usize,
    /// Sum of `emojis`.
    pub emojis: usize,
    pub common_words: Vec<WordCount>,
}

/// Aggregates for a whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    pub total_messages: usize,
    /// Per sender, in order of first appearance.
    pub senders: Vec<SenderStats>,
    /// Index is the hour of day.
    pub messages_per_hour: [usize; 24],
    /// Days with at least one message, chronological.
    pub heatmap: Vec<DayCount>,
    pub common_words: Vec<WordCount>,
}

impl ChatStats {
    /// Computes all aggregates in one pass over `rows`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstats::core::stats::ChatStats;
    /// use chatstats::pipeline::Pipeline;
    /// use chatstats::config::PipelineConfig;
    /// use chatstats::normalize::StopwordSet;
    ///
    /// # fn main() -> chatstats::Result<()> {
    /// let export = "Alice (10:00:00  01/01/2020):\nhello there\nBob (11:00:00  01/01/2020):\nhello\n";
    /// let stopwords = StopwordSet::new();
    /// let output = Pipeline::new(PipelineConfig::new(), &stopwords).run_str(export)?;
    ///
    /// let stats = ChatStats::from_rows(output.table.rows());
    /// assert_eq!(stats.senders[0].name, "Alice");
    /// assert_eq!(stats.messages_per_hour[10], 1);
    /// assert_eq!(stats.common_words[0].word, "hello");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_rows(rows: &[MessageRow]) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut per_sender: HashMap<&str, (SenderStats, WordCounter)> = HashMap::new();
        let mut per_hour = [0usize; 24];
        let mut per_day: BTreeMap<(i32, u32, u32), usize> = BTreeMap::new();
        let mut all_words = WordCounter::default();

        for row in rows {
            let (sender, words) = per_sender.entry(row.name.as_str()).or_insert_with(|| {
                order.push(row.name.as_str());
                (
                    SenderStats {
                        name: row.name.clone(),
                        messages: 0,
                        chars: 0,
                        emojis: 0,
                        common_words: Vec::new(),
                    },
                    WordCounter::default(),
                )
            });
            sender.messages += 1;
            sender.chars += row.message_len;
            sender.emojis += row.emojis;

            if let Some(slot) = per_hour.get_mut(row.hour as usize) {
                *slot += 1;
            }
            *per_day.entry((row.year, row.month, row.day)).or_default() += 1;

            if counts_words(&row.message) {
                words.add_text(&row.message);
                all_words.add_text(&row.message);
            }
        }

        let senders = order
            .into_iter()
            .filter_map(|name| per_sender.remove(name))
            .map(|(mut sender, words)| {
                sender.common_words = words.most_common(TOP_WORDS);
                sender
            })
            .collect();

        let heatmap = per_day
            .into_iter()
            .map(|((year, month, day), count)| DayCount {
                year,
                month,
                day,
                count,
            })
            .collect();

        Self {
            total_messages: rows.len(),
            senders,
            messages_per_hour: per_hour,
            heatmap,
            common_words: all_words.most_common(TOP_WORDS),
        }
    }

    /// Looks up a sender by exact name.
    pub fn sender(&self, name: &str) -> Option<&SenderStats> {
        self.senders.iter().find(|s| s.name == name)
    }

    /// The hour with the most messages, if any.
    pub fn busiest_hour(&self) -> Option<usize> {
        self.messages_per_hour
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(hour, _)| hour)
    }
}

fn counts_words(message: &str) -> bool {
    let lowered = message.to_lowercase();
    !SKIP_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Frequency table that remembers first appearance for tie-breaking.
#[derive(Debug, Default)]
struct WordCounter {
    counts: HashMap<String, (usize, usize)>,
}

impl WordCounter {
    fn add_text(&mut self, text: &str) {
        for word in text.split_whitespace() {
            if word.chars().count() < MIN_WORD_LEN {
                continue;
            }
            let next = self.counts.len();
            self.counts.entry(word.to_string()).or_insert((0, next)).0 += 1;
        }
    }

    fn most_common(self, n: usize) -> Vec<WordCount> {
        let mut entries: Vec<(String, usize, usize)> = self
            .counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        entries
            .into_iter()
            .take(n)
            .map(|(word, count, _)| WordCount { word, count })
            .collect()
    }
}
