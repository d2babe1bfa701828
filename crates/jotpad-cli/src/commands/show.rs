use std::fmt::Write as _;

use jotpad_core::markup::plain_text;
use jotpad_core::Note;

use crate::commands::common::{
    format_timestamp, open_store, resolve_note_id, StoreContext,
};
use crate::error::CliError;

pub fn run_show(id: &str, raw: bool, as_json: bool, context: &StoreContext) -> Result<(), CliError> {
    let store = open_store(context)?;
    let note_id = resolve_note_id(id, store.notes())?;
    let note = store
        .get(&note_id)
        .ok_or_else(|| CliError::NoteNotFound(id.to_string()))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        print!("{}", render_note(note, raw));
    }

    Ok(())
}

pub fn render_note(note: &Note, raw: bool) -> String {
    let body = if raw {
        note.content.clone()
    } else {
        plain_text(&note.content)
    };

    let mut output = format!(
        "{}\nid: {}\ncreated: {}  updated: {}\n",
        note.title,
        note.id,
        format_timestamp(note.created_at),
        format_timestamp(note.updated_at)
    );
    if !body.is_empty() {
        output.push('\n');
        output.push_str(&body);
        output.push('\n');
    }
    if !note.subnotes.is_empty() {
        output.push_str("\nSub-notes:\n");
        for subnote in &note.subnotes {
            let _ = writeln!(
                output,
                "  {:<36}  {}",
                subnote.id.as_str(),
                subnote.text
            );
        }
    }
    output
}
