//! The message table produced by segmentation.
//!
//! One [`RawRow`] per recovered message, in input order, with the three
//! columns `date`, `name`, `message`. Nothing is computed here; the
//! [`enrich`](crate::enrich) stage derives everything else.

use serde::{Deserialize, Serialize};

use crate::parsing::{Classified, RawMessage, classify};

/// A single table row before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Raw timestamp string, `HH:MM:SS DD/MM/YYYY`.
    pub date: String,
    /// Sender label.
    pub name: String,
    /// Canonical text from classification.
    pub message: String,
}

impl RawRow {
    pub fn new(
        date: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            message: message.into(),
        }
    }

    /// Builds the row for a segmented message from its classification.
    pub fn from_classified(msg: RawMessage, classified: Classified) -> Self {
        Self {
            date: msg.header.timestamp,
            name: msg.header.sender_name,
            message: classified.text,
        }
    }
}

/// Ordered collection of [`RawRow`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    rows: Vec<RawRow>,
}

impl MessageTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from three parallel columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns differ in length. Callers always build the
    /// columns from the same message sequence, so a mismatch is a bug.
    pub fn from_columns(dates: Vec<String>, names: Vec<String>, messages: Vec<String>) -> Self {
        assert!(
            dates.len() == names.len() && names.len() == messages.len(),
            "column length mismatch: {} dates, {} names, {} messages",
            dates.len(),
            names.len(),
            messages.len()
        );

        let rows = dates
            .into_iter()
            .zip(names)
            .zip(messages)
            .map(|((date, name), message)| RawRow {
                date,
                name,
                message,
            })
            .collect();

        Self { rows }
    }

    /// Classifies each message and materializes one row per message.
    pub fn from_messages<I>(messages: I) -> Self
    where
        I: IntoIterator<Item = RawMessage>,
    {
        messages
            .into_iter()
            .map(|msg| {
                let classified = classify(&msg);
                RawRow::from_classified(msg, classified)
            })
            .collect()
    }

    /// Appends a row.
    pub fn push(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawRow> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<RawRow> {
        self.rows
    }
}

impl FromIterator<RawRow> for MessageTable {
    fn from_iter<T: IntoIterator<Item = RawRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MessageTable {
    type Item = &'a RawRow;
    type IntoIter = std::slice::Iter<'a, RawRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
