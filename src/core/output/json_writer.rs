//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::enrich::EnrichedTable;
use crate::error::Result;

/// Writes the table to `path` as a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {"name": "Alice", "message": "hello", "message_len": 5, ...}
/// ]
/// ```
pub fn write_json(table: &EnrichedTable, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, table)?;
    writer.flush()?;
    Ok(())
}

/// Renders the table as a pretty-printed JSON array.
pub fn to_json(table: &EnrichedTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}
