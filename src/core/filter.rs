//! Row selection by date range and sender.
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Rows on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Rows on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Rows from one person |
//! | Senders | [`with_senders`](FilterConfig::with_senders) | Rows from any of several people |
//!
//! Active filters combine with AND; sender names within the filter combine
//! with OR. Sender matching ignores case.
//!
//! # Example
//!
//! ```
//! use chatstats::core::filter::{FilterConfig, apply_filters};
//! use chatstats::config::EnrichConfig;
//! use chatstats::enrich::Enricher;
//! use chatstats::normalize::StopwordSet;
//! use chatstats::table::{MessageTable, RawRow};
//!
//! # fn main() -> chatstats::Result<()> {
//! let table: MessageTable = vec![
//!     RawRow::new("12:00:00 01/01/2024", "Alice", "old"),
//!     RawRow::new("12:00:00 15/06/2024", "Alice", "new"),
//!     RawRow::new("12:00:00 15/06/2024", "Bob", "other"),
//! ]
//! .into_iter()
//! .collect();
//! let stopwords = StopwordSet::new();
//! let rows = Enricher::new(&stopwords, EnrichConfig::new()).enrich(&table)?.into_rows();
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_sender("alice");
//! let filtered = apply_filters(rows, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].message, "new");
//! # Ok(())
//! # }
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::enrich::MessageRow;
use crate::error::{ChatstatsError, Result};

/// Filter criteria for enriched rows.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only rows at or after this instant.
    pub after: Option<NaiveDateTime>,

    /// Include only rows at or before this instant.
    pub before: Option<NaiveDateTime>,

    /// Include only rows from these senders (lowercased). Empty means any.
    pub senders: Vec<String>,
}

impl FilterConfig {
    /// Creates a filter that lets everything through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive), `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date (inclusive, through 23:59:59), `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.before = Some(parse_date(date_str)?.and_time(end_of_day));
        Ok(self)
    }

    /// Adds one sender to the selection.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.senders.push(sender.into().to_lowercase());
        self
    }

    /// Adds several senders to the selection.
    #[must_use]
    pub fn with_senders<I, S>(mut self, senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.senders
            .extend(senders.into_iter().map(|s| s.into().to_lowercase()));
        self
    }

    /// Sets the start instant directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end instant directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_sender_filter()
    }

    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    pub fn has_sender_filter(&self) -> bool {
        !self.senders.is_empty()
    }

    /// Returns `true` if `row` passes every active filter.
    pub fn matches(&self, row: &MessageRow) -> bool {
        if self.after.is_some_and(|after| row.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| row.timestamp > before) {
            return false;
        }
        if self.has_sender_filter() {
            let name = row.name.to_lowercase();
            return self.senders.iter().any(|s| *s == name);
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatstatsError::invalid_date(date_str))
}

/// Keeps the rows that match `config`, preserving order.
pub fn apply_filters(rows: Vec<MessageRow>, config: &FilterConfig) -> Vec<MessageRow> {
    if !config.is_active() {
        return rows;
    }
    rows.into_iter().filter(|row| config.matches(row)).collect()
}
