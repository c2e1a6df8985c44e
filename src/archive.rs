// src/archive.rs

use anyhow::{Context, Result};
use arrow::ipc::reader::StreamReader;
use std::{fs::File, io::BufReader, path::Path};
use tracing::{info, instrument};

use crate::table::ArchiveTable;

/// Open `path`, decode it as a stream-framed record-batch archive, and
/// drain every batch into memory, in frame order.
///
/// The source handle lives only inside this function: by the time it
/// returns, the file is closed and everything is in memory.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_archive<P: AsRef<Path>>(path: P) -> Result<ArchiveTable> {
    // 1) Open the archive once
    let file = File::open(&path)
        .with_context(|| format!("Failed to open archive: {:?}", path.as_ref()))?;

    // 2) Frame decoder over the raw bytes; the schema message comes first
    let reader = StreamReader::try_new(BufReader::new(file), None)
        .with_context(|| format!("Not a stream-framed archive: {:?}", path.as_ref()))?;
    let schema = reader.schema();

    // 3) Read every batch to completion
    let mut batches = Vec::new();
    for batch in reader {
        let batch = batch
            .with_context(|| format!("Failed to decode record batch in {:?}", path.as_ref()))?;
        batches.push(batch);
    }
    // the reader (and its file handle) is dropped at this point

    info!(batches = batches.len(), "archive read");
    Ok(ArchiveTable::new(schema, batches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
    use arrow::ipc::writer::StreamWriter;
    use arrow::record_batch::RecordBatch;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn sample_schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("label", DataType::Utf8, true),
        ]))
    }

    fn make_batch(ids: &[i64], labels: &[&str]) -> RecordBatch {
        RecordBatch::try_new(
            sample_schema(),
            vec![
                Arc::new(Int64Array::from(ids.to_vec())),
                Arc::new(StringArray::from(labels.to_vec())),
            ],
        )
        .unwrap()
    }

    fn write_archive(path: &Path, schema: &SchemaRef, batches: &[RecordBatch]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = StreamWriter::try_new(file, schema)?;
        for batch in batches {
            writer.write(batch)?;
        }
        writer.finish()?;
        Ok(())
    }

    #[test]
    fn reads_all_batches_in_frame_order() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("multi.arrow");
        let batches = vec![
            make_batch(&[1, 2], &["a", "b"]),
            make_batch(&[3], &["c"]),
            make_batch(&[4, 5], &["d", "e"]),
        ];
        write_archive(&path, &sample_schema(), &batches)?;

        let table = read_archive(&path)?;
        assert_eq!(table.num_rows(), 5);
        assert_eq!(table.num_columns(), 2);

        let rows = table.to_rows()?;
        let ids: Vec<&str> = rows.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        Ok(())
    }

    #[test]
    fn reads_schema_from_empty_archive() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.arrow");
        write_archive(&path, &sample_schema(), &[])?;

        let table = read_archive(&path)?;
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.schema().fields().len(), 2);
        assert_eq!(table.schema().field(0).name(), "id");
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.arrow");
        let err = read_archive(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to open archive"));
    }

    #[test]
    fn rejects_bytes_that_are_not_an_archive() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("garbage.arrow");
        fs::write(&path, b"this is not a stream-framed archive")?;
        assert!(read_archive(&path).is_err());
        Ok(())
    }
}
