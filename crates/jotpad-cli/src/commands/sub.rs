use jotpad_core::{NoteId, SubNoteId};

use crate::cli::SubCommands;
use crate::commands::common::{
    open_store, resolve_note_id, resolve_subnote_id, CliNoteStore, StoreContext,
};
use crate::error::CliError;

pub fn run_sub(command: &SubCommands, context: &StoreContext) -> Result<(), CliError> {
    let mut store = open_store(context)?;

    match command {
        SubCommands::Add { id, text } => {
            let note_id = resolve_note_id(id, store.notes())?;
            let subnote = store
                .add_subnote(&note_id, &text.join(" "))?
                .ok_or(CliError::EmptySubnoteText)?;
            println!("{}", subnote.id);
        }
        SubCommands::Remove { id, sub_id } => {
            let note_id = resolve_note_id(id, store.notes())?;
            let subnote_id = find_subnote(&store, &note_id, id, sub_id)?;
            let removed = store
                .remove_subnote(&note_id, &subnote_id)?
                .ok_or_else(|| CliError::SubnoteNotFound(sub_id.clone()))?;
            println!("{}", removed.id);
        }
        SubCommands::Edit { id, sub_id, text } => {
            let note_id = resolve_note_id(id, store.notes())?;
            let subnote_id = find_subnote(&store, &note_id, id, sub_id)?;
            let updated = store
                .update_subnote_text(&note_id, &subnote_id, &text.join(" "))?
                .ok_or(CliError::EmptySubnoteText)?;
            println!("{}", updated.id);
        }
    }

    Ok(())
}

fn find_subnote(
    store: &CliNoteStore,
    note_id: &NoteId,
    note_query: &str,
    sub_query: &str,
) -> Result<SubNoteId, CliError> {
    let note = store
        .get(note_id)
        .ok_or_else(|| CliError::NoteNotFound(note_query.to_string()))?;
    resolve_subnote_id(sub_query, note)
}
