//! Read-side export for the visormon telemetry consumer.
//!
//! Flattens stored samples into a deterministic tabular shape, writes CSV
//! files, and runs the optional periodic auto-exporter. Everything here is
//! a pure read over snapshot copies — exporting never mutates the store
//! and never blocks ingestion beyond the snapshot copy itself.

mod auto;
mod rows;
mod writer;

pub use auto::AutoExporter;
pub use rows::{ExportTable, FIXED_COLUMNS, export_rows};
pub use writer::write_csv;

/// Errors produced when writing an export to disk.
///
/// Export failures are reported to the caller and never affect engine
/// state.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
