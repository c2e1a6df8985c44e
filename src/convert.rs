// src/convert.rs

use anyhow::Result;
use std::path::Path;
use tracing::{info, instrument};

use crate::{archive, write};

/// Rows shown in the console preview of the materialized table.
const PREVIEW_ROWS: usize = 10;

/// Read the archive at `src` fully into memory, then write it to `dst`
/// as CSV with a leading zero-based row-index column.
///
/// The source handle is released before `dst` is created, so a missing
/// or malformed archive never leaves anything at the destination.
#[instrument(
    level = "info",
    skip(src, dst),
    fields(src = %src.as_ref().display(), dst = %dst.as_ref().display())
)]
pub fn convert_archive_to_csv<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    // 1) Materialize the whole archive
    let table = archive::read_archive(src)?;

    // 2) Console diagnostics: schema listing plus a short data preview
    println!("=== Archive: {} ===", src.display());
    println!("Rows:    {}", table.num_rows());
    println!("Columns: {}", table.num_columns());
    for field in table.schema().fields() {
        println!(
            "- {:<30} | {:<20} | nullable: {}",
            field.name(),
            format!("{:?}", field.data_type()),
            field.is_nullable()
        );
    }
    println!("{}", table.preview(PREVIEW_ROWS)?);

    // 3) Row-major projection, then CSV out
    let rows = table.to_rows()?;
    write::write_csv(&rows, dst)?;

    info!(rows = table.num_rows(), "wrote {}", dst.display());
    Ok(())
}
