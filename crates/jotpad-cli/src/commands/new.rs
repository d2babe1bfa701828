use crate::commands::common::{open_store, resolve_note_content, StoreContext};
use crate::error::CliError;

pub fn run_new(
    title: Option<&str>,
    content_parts: &[String],
    context: &StoreContext,
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?.unwrap_or_default();
    let mut store = open_store(context)?;

    // A fresh store already holds one blank note; fill it instead of adding another.
    let placeholder = store.config().placeholder_title.clone();
    let note = match store.current_note() {
        Some(note) if note.is_pristine(&placeholder) => note.clone(),
        _ => store.create_note()?,
    };

    let note = store
        .update_note(&note.id, title.unwrap_or_default(), &content)?
        .unwrap_or(note);

    println!("{}", note.id);
    Ok(())
}
