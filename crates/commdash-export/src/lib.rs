//! commdash-export - CSV export of tabular dashboard data.
//!
//! Records are JSON objects; the first record fixes the column order and
//! every later record is written in that order.

mod config;
mod error;
mod exporter;

pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use exporter::{render_csv, CsvExporter, CSV_MIME};
