use jotpad_core::markup::escape_html;
use jotpad_core::Autosave;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::common::{open_store, resolve_note_id, StoreContext};
use crate::error::CliError;

/// Stream stdin into a note line by line.
///
/// Lines arriving in quick succession are saved together once input pauses;
/// whatever is left is saved at end of input.
pub async fn run_write(id: &str, context: &StoreContext) -> Result<(), CliError> {
    let store = open_store(context)?;
    let note_id = resolve_note_id(id, store.notes())?;
    let note = store
        .get(&note_id)
        .cloned()
        .ok_or_else(|| CliError::NoteNotFound(id.to_string()))?;

    let mut autosave = Autosave::for_store(store);
    let mut content = note.content;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        content.push_str(&line_fragment(&line));
        autosave.edit(note_id.clone(), note.title.clone(), content.clone());
    }

    autosave.save_now().await?;
    println!("{note_id}");
    Ok(())
}

/// Markup for one typed line, matching what a rich editor produces.
pub fn line_fragment(line: &str) -> String {
    if line.trim().is_empty() {
        "<div><br></div>".to_string()
    } else {
        format!("<div>{}</div>", escape_html(line))
    }
}
