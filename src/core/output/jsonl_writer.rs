//! JSON Lines (JSONL) output writer.
//!
//! One row per line, so large tables can be consumed incrementally.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::enrich::EnrichedTable;
use crate::error::Result;

/// Writes one JSON object per row to any writer.
pub fn write_jsonl_to<W: Write>(table: &EnrichedTable, mut writer: W) -> Result<()> {
    for row in table {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the table to `path` as JSON Lines.
///
/// ```jsonl
/// {"name":"Alice","message":"hello","message_len":5,...}
/// {"name":"Bob","message":"Attachment","message_len":10,...}
/// ```
pub fn write_jsonl(table: &EnrichedTable, path: impl AsRef<Path>) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    write_jsonl_to(table, writer)
}

/// Renders the table as JSON Lines.
pub fn to_jsonl(table: &EnrichedTable) -> Result<String> {
    let mut buf = Vec::new();
    write_jsonl_to(table, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
