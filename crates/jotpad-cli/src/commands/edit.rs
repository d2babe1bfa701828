use crate::commands::common::{
    capture_editor_input_with_initial, open_store, resolve_note_id, StoreContext,
};
use crate::error::CliError;

pub fn run_edit(
    id: &str,
    title: Option<&str>,
    content: Option<&str>,
    context: &StoreContext,
) -> Result<(), CliError> {
    let mut store = open_store(context)?;
    let note_id = resolve_note_id(id, store.notes())?;
    let note = store
        .get(&note_id)
        .cloned()
        .ok_or_else(|| CliError::NoteNotFound(id.to_string()))?;

    let edited_content = match (title, content) {
        (None, None) => capture_editor_input_with_initial(&note.content)?,
        (_, Some(content)) => content.to_string(),
        (Some(_), None) => note.content.clone(),
    };
    let edited_title = title.unwrap_or(note.title.as_str());

    if edited_title == note.title && edited_content == note.content {
        println!("{}", note.id);
        return Ok(());
    }

    let updated = store
        .update_note(&note.id, edited_title, &edited_content)?
        .ok_or_else(|| CliError::NoteNotFound(id.to_string()))?;
    println!("{}", updated.id);
    Ok(())
}
