//! Note export helpers.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::markup::plain_text;
use crate::Note;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render notes as pretty-printed JSON in the same shape as the snapshot.
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(notes)
}

/// Render notes in Markdown with frontmatter blocks.
///
/// Content is written as plain text; sub-notes follow as a checklist.
#[must_use]
pub fn render_markdown_export(notes: &[Note]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", note.id);
        let _ = writeln!(output, "title: {}", note.title);
        let _ = writeln!(output, "created_at: {}", note.created_at);
        let _ = writeln!(output, "updated_at: {}", note.updated_at);
        let _ = writeln!(output, "---");
        let _ = writeln!(output);

        let body = plain_text(&note.content);
        if !body.is_empty() {
            let _ = writeln!(output, "{body}");
        }
        if !note.subnotes.is_empty() {
            if !body.is_empty() {
                let _ = writeln!(output);
            }
            for subnote in &note.subnotes {
                let _ = writeln!(output, "- [ ] {}", subnote.text);
            }
        }
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Default file name offered for an export download.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat) -> String {
    format!("notes-export.{}", format.extension())
}
