//! Output CSV writer and row expansion.
//!
//! Each input row expands into one output row per assigned product and
//! one per assigned item. The two new columns lead the header; every
//! original column follows in its original order. The output mirrors
//! the input's dialect (comma, double-quote, CRLF) and its detected
//! encoding, BOM included.

use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::CsvResult;
use crate::extract::PimAssignments;
use crate::parser::Encoding;

/// Leading output column for the PIM product number.
pub const PRODUCT_COLUMN: &str = "PIM Product no.";

/// Leading output column for the PIM item number.
pub const ITEM_COLUMN: &str = "PIM Item no.";

/// Sentinel values for an asset with no assignments at all.
pub const NOT_ASSIGNED_PRODUCT: &str = "NOT ASSIGNED TO ANY PRODUCTS";
pub const NOT_ASSIGNED_ITEM: &str = "NOT ASSIGNED TO ANY ITEMS";

/// Suffix inserted before the extension to name the output file.
const OUTPUT_SUFFIX: &str = "_pim-assignments";

/// Derive the output path from the input path:
/// `assets.csv` → `assets_pim-assignments.csv`, alongside the input.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.csv"))
}

/// Writer for the expanded output file.
pub struct OutputWriter {
    writer: csv::Writer<File>,
    headers: Vec<String>,
}

impl OutputWriter {
    /// Create (truncating) the output file, emit the BOM if the input
    /// carried one, and write the header row.
    pub fn create(path: &Path, headers: &[String], encoding: Encoding) -> CsvResult<Self> {
        let mut file = File::create(path)?;
        file.write_all(encoding.bom())?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);

        let mut header_record = vec![PRODUCT_COLUMN.to_string(), ITEM_COLUMN.to_string()];
        header_record.extend(headers.iter().cloned());
        writer.write_record(&header_record)?;

        Ok(Self {
            writer,
            headers: headers.to_vec(),
        })
    }

    /// Expand one input row into its assignment rows and write them.
    ///
    /// Products first, then items; exactly one of the two new columns
    /// populated per row. Returns the number of rows written. An empty
    /// assignment set writes nothing.
    pub fn write_assignments(
        &mut self,
        row: &Map<String, Value>,
        assignments: &PimAssignments,
    ) -> CsvResult<usize> {
        for product in &assignments.products {
            self.write_row(Some(product), None, row)?;
        }
        for item in &assignments.items {
            self.write_row(None, Some(item), row)?;
        }
        Ok(assignments.len())
    }

    fn write_row(
        &mut self,
        product: Option<&str>,
        item: Option<&str>,
        row: &Map<String, Value>,
    ) -> CsvResult<()> {
        let mut record = Vec::with_capacity(self.headers.len() + 2);
        record.push(product.unwrap_or(""));
        record.push(item.unwrap_or(""));
        for header in &self.headers {
            record.push(row.get(header).and_then(Value::as_str).unwrap_or(""));
        }
        self.writer.write_record(&record)?;
        Ok(())
    }

    /// Flush everything to disk.
    pub fn finish(mut self) -> CsvResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Build the sentinel row for an asset with no assignments.
///
/// The export format defines this row but the tool does not emit it
/// today; unassigned assets simply produce no output rows.
pub fn not_assigned_row(headers: &[String], row: &Map<String, Value>) -> Vec<String> {
    let mut record = vec![NOT_ASSIGNED_PRODUCT.to_string(), NOT_ASSIGNED_ITEM.to_string()];
    for header in headers {
        record.push(
            row.get(header)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        );
    }
    record
}
