use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use jotpad_core::markup::image_fragment;

use crate::commands::common::{open_store, resolve_note_id, StoreContext};
use crate::error::CliError;

pub fn run_attach(id: &str, file: &Path, context: &StoreContext) -> Result<(), CliError> {
    let mime_type = image_mime_type(file)?;
    let bytes = std::fs::read(file)?;
    let fragment = image_fragment(&image_data_url(&mime_type, &bytes));

    let mut store = open_store(context)?;
    let note_id = resolve_note_id(id, store.notes())?;
    let note = store
        .insert_fragment(&note_id, &fragment)?
        .ok_or_else(|| CliError::NoteNotFound(id.to_string()))?;

    tracing::info!(
        "Embedded {} ({} bytes) into note {}",
        file.display(),
        bytes.len(),
        note.id
    );
    println!("{}", note.id);
    Ok(())
}

/// Image MIME type guessed from the file extension.
pub fn image_mime_type(path: &Path) -> Result<String, CliError> {
    match mime_guess::from_path(path).first_raw() {
        Some(mime_type) if mime_type.starts_with("image/") => Ok(mime_type.to_string()),
        _ => Err(CliError::NotAnImage(path.display().to_string())),
    }
}

pub fn image_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", B64.encode(bytes))
}
