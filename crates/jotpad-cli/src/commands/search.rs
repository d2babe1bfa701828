use crate::commands::common::{
    format_note_lines, note_to_list_item, open_store, NoteListItem, StoreContext,
};
use crate::error::CliError;

pub fn run_search(query: &str, as_json: bool, context: &StoreContext) -> Result<(), CliError> {
    let store = open_store(context)?;
    let notes = store.search(query);
    tracing::debug!("Search '{}' matched {} notes", query, notes.len());

    if as_json {
        let json_items = notes
            .iter()
            .map(|note| note_to_list_item(note, store.current_id()))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_note_lines(notes, store.current_id()) {
            println!("{line}");
        }
    }

    Ok(())
}
