//! Message text normalization.
//!
//! Normalization lowercases a message, splits it into Unicode word runs,
//! drops stopwords and joins the survivors with single spaces. Non-prose
//! content (the forwarded/attachment placeholders and anything containing a
//! link) passes through unchanged.
//!
//! The stopword set and the memoization cache are explicit values: build a
//! [`StopwordSet`] once, hand a reference to a [`Normalizer`], and pass a
//! [`NormalizationCache`] wherever results should be reused.
//!
//! # Example
//!
//! ```rust
//! use chatstats::normalize::{Normalizer, StopwordSet};
//!
//! let stopwords = StopwordSet::from_words(["the"]);
//! let normalizer = Normalizer::new(&stopwords);
//!
//! assert_eq!(normalizer.normalize("The quick BROWN fox"), "quick brown fox");
//! ```

mod cache;
mod stopwords;

use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::{ATTACHMENT_MARKER, FORWARDED_PLACEHOLDER};

pub use cache::{DEFAULT_CACHE_CAPACITY, NormalizationCache};
pub use stopwords::StopwordSet;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

static PLACEHOLDERS: LazyLock<[String; 2]> = LazyLock::new(|| {
    [
        FORWARDED_PLACEHOLDER.to_lowercase(),
        ATTACHMENT_MARKER.to_lowercase(),
    ]
});

/// Substring that marks a message as containing a link.
pub const URL_MARKER: &str = "http";

/// Returns `true` if already-lowercased text must not be tokenized.
pub fn is_passthrough(lowered: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| p == lowered) || lowered.contains(URL_MARKER)
}

/// Stateless text normalizer bound to a stopword set.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    stopwords: &'a StopwordSet,
}

impl<'a> Normalizer<'a> {
    pub fn new(stopwords: &'a StopwordSet) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &'a StopwordSet {
        self.stopwords
    }

    /// Normalizes `text`.
    ///
    /// Placeholders and link-bearing text are matched case-insensitively and
    /// returned exactly as given.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        if is_passthrough(&lowered) {
            return text.to_string();
        }

        let mut out = String::with_capacity(lowered.len());
        for token in WORD_RE.find_iter(&lowered).map(|m| m.as_str()) {
            if self.stopwords.contains(token) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        }
        out
    }

    /// Normalizes `text` through `cache`.
    pub fn normalize_cached(&self, text: &str, cache: &mut NormalizationCache) -> String {
        cache.get_or_insert_with(text, |t| self.normalize(t))
    }
}
