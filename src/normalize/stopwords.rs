//! Stopword set used by the normalizer.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{ChatstatsError, Result};

/// Read-only set of tokens dropped during normalization.
///
/// Built once and shared by reference; it is never mutated after
/// construction, so it can be read from any number of worker threads.
/// Words are stored lowercased because the normalizer only ever looks up
/// lowercased tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Creates an empty set (normalization then only lowercases and
    /// re-tokenizes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from an explicit word list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstats::normalize::StopwordSet;
    ///
    /// let set = StopwordSet::from_words(["The", "a"]);
    /// assert!(set.contains("the"));
    /// assert!(!set.contains("fox"));
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Parses a whitespace-separated resource.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.split_whitespace())
    }

    /// Loads the resource at `path`.
    ///
    /// A missing file is reported as
    /// [`ChatstatsError::StopwordResourceMissing`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ChatstatsError::stopwords_missing(path),
            _ => ChatstatsError::Io(e),
        })?;

        let set = Self::parse(&text);
        debug!(path = %path.display(), words = set.len(), "loaded stopwords");
        Ok(set)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
