use crate::commands::common::{confirm, open_store, resolve_note_id, StoreContext};
use crate::error::CliError;

pub fn run_delete(id: &str, skip_confirmation: bool, context: &StoreContext) -> Result<(), CliError> {
    let mut store = open_store(context)?;
    let note_id = resolve_note_id(id, store.notes())?;

    if !skip_confirmation {
        let title = store.get(&note_id).map(|note| note.title.clone()).unwrap_or_default();
        if !confirm(&format!("Delete note \"{title}\"?"))? {
            eprintln!("Cancelled");
            return Ok(());
        }
    }

    let Some(removed) = store.delete_note(&note_id)? else {
        return Err(CliError::NoteNotFound(id.to_string()));
    };
    println!("{}", removed.id);

    if let Some(current) = store.current_id() {
        tracing::info!("Current note is now {}", current);
    }
    Ok(())
}
