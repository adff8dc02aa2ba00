//! Single-pass batch driver.
//!
//! One row is fully fetched, extracted, and written before the next
//! begins; the only blocking point is the network fetch, bounded by
//! the per-request timeout. A fatal error mid-loop leaves whatever was
//! already written on disk, except for the missing-URL-column case,
//! which deletes the partial output before returning.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{PipelineError, PipelineResult};
use crate::extract::pim_assignments;
use crate::fetch::{AssetClient, DEFAULT_TIMEOUT_SECS};
use crate::logs::{log_info, log_success, log_warning};
use crate::parser::parse_csv_file;
use crate::writer::{not_assigned_row, output_path, OutputWriter};

/// Input file the eDAM export lands in when none is given.
pub const DEFAULT_INPUT_FILE: &str = "PDF_documents_received_as_images_Sheet1.csv";

/// Column holding each asset's URL in the export.
pub const DEFAULT_URL_COLUMN: &str = "p_internalurl";

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Input CSV file.
    pub input: PathBuf,

    /// Name of the column holding asset URLs.
    pub url_column: String,

    /// Per-request download timeout.
    pub timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            url_column: DEFAULT_URL_COLUMN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Counters for a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Input data rows read.
    pub rows_read: usize,

    /// Output rows written (one per assignment).
    pub rows_written: usize,

    /// Rows whose download returned an HTTP error status.
    pub download_failures: usize,

    /// Where the expanded CSV was written.
    pub output_path: PathBuf,
}

/// Run the whole batch: parse input, then per row fetch, extract,
/// expand, write.
///
/// Fatal conditions: missing input file, missing URL column (partial
/// output is deleted first), transport-level download failures, and
/// non-JSON response bodies. HTTP error statuses and empty URL cells
/// only skip their row.
pub async fn run(options: &RunOptions) -> PipelineResult<RunSummary> {
    let parsed = parse_csv_file(&options.input)?;
    let out_path = output_path(&options.input);

    let mut writer = OutputWriter::create(&out_path, &parsed.headers, parsed.encoding)?;
    let client = AssetClient::new(options.timeout)?;

    let mut summary = RunSummary {
        rows_read: parsed.rows.len(),
        rows_written: 0,
        download_failures: 0,
        output_path: out_path.clone(),
    };

    for row in &parsed.rows {
        let Some(url_value) = row.get(&options.url_column) else {
            // Checked per row for parity with the export tooling this
            // replaces; in practice it can only trip on the first row,
            // when the header itself lacks the column.
            drop(writer);
            let _ = std::fs::remove_file(&out_path);
            return Err(PipelineError::UrlColumnMissing(options.url_column.clone()));
        };

        let url = url_value.as_str().unwrap_or("");
        if url.is_empty() {
            continue;
        }

        log_info(format!("Downloading: {url}"));
        let Some(asset) = client.fetch_asset_json(url).await? else {
            log_warning(format!("Download failed: {url}"));
            summary.download_failures += 1;
            continue;
        };

        log_info("Processing...");
        let assignments = pim_assignments(Some(&asset));
        if assignments.is_empty() {
            // The unassigned marker row exists in the format but is
            // not emitted today.
            let _ = not_assigned_row(&parsed.headers, row);
            continue;
        }

        summary.rows_written += writer.write_assignments(row, &assignments)?;
    }

    writer.finish()?;
    log_success(format!(
        "Wrote {} rows for {} assets to {} ({} download failures)",
        summary.rows_written,
        summary.rows_read,
        summary.output_path.display(),
        summary.download_failures
    ));
    Ok(summary)
}
