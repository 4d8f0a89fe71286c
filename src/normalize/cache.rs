//! Bounded memoization table for normalized text.

use std::collections::{BTreeMap, HashMap};

/// Default number of entries kept by [`NormalizationCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    tick: u64,
}

/// Least-recently-used cache keyed by the exact raw message text.
///
/// Eviction only affects performance: a miss recomputes the same value.
/// A capacity of zero disables caching entirely.
///
/// # Example
///
/// ```rust
/// use chatstats::normalize::NormalizationCache;
///
/// let mut cache = NormalizationCache::with_capacity(2);
/// cache.insert("a".into(), "x".into());
/// cache.insert("b".into(), "y".into());
/// cache.get("a");                       // "a" is now the most recent
/// cache.insert("c".into(), "z".into()); // evicts "b"
///
/// assert!(cache.peek("a").is_some());
/// assert!(cache.peek("b").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct NormalizationCache {
    capacity: usize,
    entries: HashMap<String, CacheEntry>,
    // tick -> key, oldest first
    recency: BTreeMap<u64, String>,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl Default for NormalizationCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl NormalizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            recency: BTreeMap::new(),
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up `key`, marking it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        self.tick += 1;
        let tick = self.tick;

        match self.entries.get_mut(key) {
            Some(entry) => {
                self.hits += 1;
                let old = std::mem::replace(&mut entry.tick, tick);
                if let Some(k) = self.recency.remove(&old) {
                    self.recency.insert(tick, k);
                }
                Some(entry.value.as_str())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Looks up `key` without touching recency or hit counters.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    /// Inserts a value, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: String, value: String) {
        if self.capacity == 0 {
            return;
        }

        self.tick += 1;
        let tick = self.tick;

        if let Some(entry) = self.entries.get_mut(&key) {
            let old = std::mem::replace(&mut entry.tick, tick);
            entry.value = value;
            self.recency.remove(&old);
            self.recency.insert(tick, key);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some((_, oldest)) = self.recency.pop_first() {
                self.entries.remove(&oldest);
            }
        }

        self.recency.insert(tick, key.clone());
        self.entries.insert(key, CacheEntry { value, tick });
    }

    /// Returns the cached value for `key`, computing and storing it on a
    /// miss.
    pub fn get_or_insert_with<F>(&mut self, key: &str, compute: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        if let Some(value) = self.get(key) {
            return value.to_string();
        }
        let value = compute(key);
        self.insert(key.to_string(), value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops all entries; counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}
