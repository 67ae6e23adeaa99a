//! Plain-text report export

use std::io::Write;

use crate::error::{KakeboError, KakeboResult};

use super::document::ReportDocument;

/// Write the narrative verbatim, or a note that no report was generated
pub fn export_report_text<W: Write>(document: &ReportDocument, writer: &mut W) -> KakeboResult<()> {
    let body = match &document.narrative {
        Some(text) => text.trim_end(),
        None => "No report has been generated yet. Run `report` first.",
    };

    writeln!(writer, "{}", body).map_err(|e| KakeboError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| KakeboError::Export(e.to_string()))?;
    writeln!(writer, "Exported {}", document.exported_at.format("%Y-%m-%d %H:%M UTC"))
        .map_err(|e| KakeboError::Export(e.to_string()))?;
    Ok(())
}
