//! Configuration types for the pipeline.
//!
//! Plain builder-style structs with no CLI framework dependencies. All of
//! them implement `Serialize`/`Deserialize`, so a driver can keep them in a
//! settings file if it wants to.
//!
//! - [`ExportConfig`] - how the export file is read and segmented
//! - [`EnrichConfig`] - normalization cache and worker pool sizing
//! - [`PipelineConfig`] - both of the above plus the stopword resource path
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{EnrichConfig, PipelineConfig};
//!
//! let config = PipelineConfig::new()
//!     .with_stopwords_path("data/stopwords")
//!     .with_enrich(EnrichConfig::new().with_workers(4).with_cache_capacity(10_000));
//!
//! assert_eq!(config.enrich.workers, Some(4));
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::normalize::DEFAULT_CACHE_CAPACITY;

/// Default location of the stopword resource.
pub const DEFAULT_STOPWORDS_PATH: &str = "data/stopwords";

/// How the export file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Read the export incrementally instead of loading it whole
    /// (default: false)
    pub streaming: bool,

    /// Read buffer size for streaming mode (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            streaming: false,
            buffer_size: 64 * 1024,
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a streaming configuration with a larger buffer.
    pub fn streaming() -> Self {
        Self {
            streaming: true,
            buffer_size: 256 * 1024,
        }
    }

    #[must_use]
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.streaming = enabled;
        self
    }

    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}

/// Enrichment settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichConfig {
    /// Maximum entries in the normalization cache (default: 4096)
    pub cache_capacity: usize,

    /// Worker threads for row enrichment; `None` uses one per CPU
    pub workers: Option<usize>,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            workers: None,
        }
    }
}

impl EnrichConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Number of worker threads to use, never less than one.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub export: ExportConfig,
    pub enrich: EnrichConfig,
    /// Stopword resource location (default: `data/stopwords`)
    pub stopwords_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            enrich: EnrichConfig::default(),
            stopwords_path: PathBuf::from(DEFAULT_STOPWORDS_PATH),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    #[must_use]
    pub fn with_enrich(mut self, enrich: EnrichConfig) -> Self {
        self.enrich = enrich;
        self
    }

    #[must_use]
    pub fn with_stopwords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_path = path.into();
        self
    }
}
