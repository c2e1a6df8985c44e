// src/table.rs

use anyhow::Result;
use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use arrow::util::pretty::pretty_format_batches;

/// All record batches from one archive, plus the schema they share.
#[derive(Debug)]
pub struct ArchiveTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

/// Row-major view of an [`ArchiveTable`], shaped for line-oriented output.
#[derive(Debug)]
pub struct RowTable {
    /// Column names, in schema order.
    pub headers: Vec<String>,
    /// One entry per row, one rendered field per column.
    pub rows: Vec<Vec<String>>,
}

impl ArchiveTable {
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Total rows across all batches.
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Render up to `max_rows` leading rows as an aligned text table.
    ///
    /// Batches are concatenated first, so an archive with zero rows still
    /// renders its column header.
    pub fn preview(&self, max_rows: usize) -> Result<String> {
        let merged = concat_batches(&self.schema, &self.batches)?;
        let head = merged.slice(0, max_rows.min(merged.num_rows()));
        Ok(pretty_format_batches(&[head])?.to_string())
    }

    /// Project into a row-major table of rendered fields.
    ///
    /// Rows come out in batch order then in-batch order; null values
    /// render as empty strings.
    pub fn to_rows(&self) -> Result<RowTable> {
        let headers: Vec<String> = self
            .schema
            .fields()
            .iter()
            .map(|f| f.name().to_string())
            .collect();

        let options = FormatOptions::default();
        let mut rows = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            let formatters = batch
                .columns()
                .iter()
                .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
                .collect::<Result<Vec<_>, _>>()?;

            for i in 0..batch.num_rows() {
                let mut row = Vec::with_capacity(formatters.len());
                for formatter in &formatters {
                    row.push(formatter.value(i).try_to_string()?);
                }
                rows.push(row);
            }
        }

        Ok(RowTable { headers, rows })
    }
}
