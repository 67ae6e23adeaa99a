//! Guidance dialog rendering

use crate::services::{DialogKind, DialogState, GuidanceDialog};

use super::summary::truncate;

const WIDTH: usize = 60;

fn title(kind: DialogKind) -> &'static str {
    match kind {
        DialogKind::Diagnosis => "GUARDIAN DIAGNOSIS: survival spending is too high",
        DialogKind::Report => "KAKEBO GUARDIAN REPORT",
    }
}

/// Render a dialog as a framed text block
///
/// Collaborator text is shown verbatim so its line breaks survive.
pub fn format_dialog(dialog: &GuidanceDialog) -> String {
    let body = match dialog.state() {
        DialogState::Closed => return format!("The {} dialog is closed.\n", dialog.kind()),
        DialogState::Loading => "Consulting the Guardian...".to_string(),
        DialogState::Ready => dialog.content().unwrap_or_default().trim_end().to_string(),
    };

    let hint = match dialog.kind() {
        DialogKind::Diagnosis => "Type `ack` to acknowledge.",
        DialogKind::Report => "Type `close-report` to close.",
    };

    let rule = "═".repeat(WIDTH);
    format!(
        "{rule}\n{}\n{rule}\n{}\n{}\n{}\n",
        truncate(title(dialog.kind()), WIDTH),
        body,
        "─".repeat(WIDTH),
        hint,
        rule = rule
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_dialog() {
        let dialog = GuidanceDialog::new(DialogKind::Report);
        assert!(format_dialog(&dialog).contains("closed"));
    }

    #[test]
    fn test_loading_then_ready() {
        let mut dialog = GuidanceDialog::new(DialogKind::Diagnosis);
        let ticket = dialog.open();
        assert!(format_dialog(&dialog).contains("Consulting"));

        dialog.resolve(ticket, "Line one\n\nLine two\n".to_string());
        let output = format_dialog(&dialog);
        assert!(output.contains("GUARDIAN DIAGNOSIS"));
        assert!(output.contains("Line one\n\nLine two\n"));
        assert!(output.contains("`ack`"));
    }
}
