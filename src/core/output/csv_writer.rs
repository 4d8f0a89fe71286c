//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::enrich::{COLUMNS, EnrichedTable};
use crate::error::Result;

/// Writes the table as CSV to any writer.
///
/// # Format
/// - Delimiter: `;`
/// - Header row: `name;message;message_len;emojis;year;month;day;hour;minute;second`
/// - Encoding: UTF-8
pub fn write_csv_to<W: Write>(table: &EnrichedTable, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    // explicit header so an empty table still gets one
    writer.write_record(COLUMNS)?;
    for row in table {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the table as CSV to `path`.
pub fn write_csv(table: &EnrichedTable, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    write_csv_to(table, file)
}

/// Renders the table as a CSV string.
pub fn to_csv(table: &EnrichedTable) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_to(table, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
