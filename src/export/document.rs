//! Structured report export
//!
//! Writes the assembled report input together with the generated narrative
//! as a versioned JSON or YAML document.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{KakeboError, KakeboResult};
use crate::models::{Category, Money};
use crate::reports::ReportInput;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.1.0";

/// One category slice of the spending chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub category: Category,
    pub name: String,
    pub total: Money,
    pub color: String,
}

/// Chart slices for every category with spending, largest first
pub fn chart_slices(input: &ReportInput) -> Vec<ChartSlice> {
    let mut slices: Vec<ChartSlice> = input
        .category_totals
        .iter()
        .filter(|(_, total)| total.is_positive())
        .map(|(category, total)| ChartSlice {
            category: *category,
            name: category.display_name().to_string(),
            total: *total,
            color: category.color().to_string(),
        })
        .collect();
    slices.sort_by(|a, b| b.total.cmp(&a.total));
    slices
}

/// A report as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Ledger state the report was generated from
    pub input: ReportInput,

    /// Spending per category with its chart color
    #[serde(default)]
    pub chart: Vec<ChartSlice>,

    /// Generated report text, if a report was produced
    pub narrative: Option<String>,
}

impl ReportDocument {
    pub fn new(input: ReportInput, narrative: Option<String>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            chart: chart_slices(&input),
            input,
            narrative,
        }
    }
}

/// Write the document as pretty-printed JSON
pub fn export_report_json<W: Write>(document: &ReportDocument, writer: &mut W) -> KakeboResult<()> {
    serde_json::to_writer_pretty(&mut *writer, document)?;
    writeln!(writer).map_err(|e| KakeboError::Export(e.to_string()))?;
    Ok(())
}

/// Write the document as YAML with a comment header
pub fn export_report_yaml<W: Write>(document: &ReportDocument, writer: &mut W) -> KakeboResult<()> {
    writeln!(writer, "# Kakebo Guardian report").map_err(|e| KakeboError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", document.exported_at)
        .map_err(|e| KakeboError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| KakeboError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, document)?;
    Ok(())
}
