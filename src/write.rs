// src/write.rs

use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;
use tracing::info;

use crate::table::RowTable;

/// Serialize `table` to `path` as CSV.
///
/// The first record is the header: an empty leading field, then the
/// column names. Each data record is the zero-based row index followed
/// by the row's fields. Quoting is the default: fields containing the
/// delimiter, a quote, or a newline are double-quoted.
pub fn write_csv<P: AsRef<Path>>(table: &RowTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer =
        Writer::from_path(path).with_context(|| format!("Failed to create {}", path.display()))?;

    // 1) Header row, with an unnamed slot for the index column
    let mut header: Vec<&str> = Vec::with_capacity(table.headers.len() + 1);
    header.push("");
    header.extend(table.headers.iter().map(String::as_str));
    writer
        .write_record(&header)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;

    // 2) Data rows, index first
    for (idx, row) in table.rows.iter().enumerate() {
        let idx = idx.to_string();
        let mut record: Vec<&str> = Vec::with_capacity(row.len() + 1);
        record.push(&idx);
        record.extend(row.iter().map(String::as_str));
        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write row {} to {}", idx, path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    info!(rows = table.rows.len(), "csv written");
    Ok(())
}
