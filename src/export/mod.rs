//! Export module for Kakebo
//!
//! Provides report and ledger export in multiple formats:
//! - JSON: versioned report document (machine-readable)
//! - YAML: the same document, human-readable
//! - CSV: expense and savings rows (spreadsheet-compatible)
//! - Text: the generated narrative only

pub mod csv;
pub mod document;
pub mod text;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::error::{KakeboError, KakeboResult};
use crate::reports::assemble_report;
use crate::services::Ledger;

pub use csv::export_ledger_csv;
pub use document::{
    chart_slices, export_report_json, export_report_yaml, ChartSlice, ReportDocument,
    EXPORT_SCHEMA_VERSION,
};
pub use text::export_report_text;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// Write `ledger` (and the latest report narrative) in `format`
pub fn export_to_writer<W: Write>(
    format: ExportFormat,
    ledger: &Ledger,
    narrative: Option<&str>,
    writer: &mut W,
) -> KakeboResult<()> {
    if format == ExportFormat::Csv {
        return export_ledger_csv(ledger, writer);
    }

    let document = ReportDocument::new(assemble_report(ledger), narrative.map(str::to_string));
    match format {
        ExportFormat::Json => export_report_json(&document, writer),
        ExportFormat::Yaml => export_report_yaml(&document, writer),
        ExportFormat::Text | ExportFormat::Csv => export_report_text(&document, writer),
    }
}

/// Export to a file, creating parent directories as needed
pub fn export_to_file(
    format: ExportFormat,
    ledger: &Ledger,
    narrative: Option<&str>,
    path: &Path,
) -> KakeboResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| KakeboError::Export(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let file = File::create(path)
        .map_err(|e| KakeboError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    export_to_writer(format, ledger, narrative, &mut writer)?;
    writer.flush()?;

    info!(format = ?format, path = %path.display(), "Export written");
    Ok(())
}
