//! # edam-pim - eDAM asset PIM assignment enrichment
//!
//! Enriches a CSV export of eDAM digital assets with the PIM product
//! and item numbers each asset is assigned to, by fetching every
//! asset's JSON representation (`<url>.2.json`) and expanding each
//! input row into one output row per assignment.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV export │────▶│   Fetcher   │────▶│  Extractor  │────▶│  CSV output │
//! │  (BOM probe)│     │  (.2.json)  │     │ (PIM lists) │     │ (expanded)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use edam_pim::{run, RunOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let summary = run(&RunOptions::default()).await.unwrap();
//!     println!("Wrote {} rows", summary.rows_written);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`parser`] - Input CSV reading with BOM detection
//! - [`fetch`] - Asset JSON download
//! - [`extract`] - PIM assignment extraction
//! - [`writer`] - Row expansion and output writing
//! - [`pipeline`] - Single-pass batch driver
//! - [`logs`] - Console progress reporting

pub mod error;
pub mod extract;
pub mod fetch;
pub mod logs;
pub mod parser;
pub mod pipeline;
pub mod writer;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, FetchError, PipelineError};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{parse_bytes, parse_csv_file, Encoding, ParseResult};

// =============================================================================
// Re-exports - Fetching
// =============================================================================

pub use fetch::{asset_json_url, AssetClient, DEFAULT_TIMEOUT_SECS, JSON_SUFFIX};

// =============================================================================
// Re-exports - Extraction
// =============================================================================

pub use extract::{pim_assignments, PimAssignments, ITEM_FIELD, PRODUCT_FIELD};

// =============================================================================
// Re-exports - Writing
// =============================================================================

pub use writer::{output_path, OutputWriter, ITEM_COLUMN, PRODUCT_COLUMN};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{run, RunOptions, RunSummary, DEFAULT_INPUT_FILE, DEFAULT_URL_COLUMN};
