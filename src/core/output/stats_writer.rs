//! JSON writer for chat statistics.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::stats::ChatStats;
use crate::error::Result;

/// Writes `stats` to `path` as pretty-printed JSON.
pub fn write_stats_json(stats: &ChatStats, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, stats)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Renders `stats` as pretty-printed JSON.
pub fn stats_to_json(stats: &ChatStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}
