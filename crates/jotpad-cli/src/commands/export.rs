use std::path::Path;

use jotpad_core::export::{self, suggested_export_file_name};

use crate::cli::ExportFormat;
use crate::commands::common::{open_store, StoreContext};
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    context: &StoreContext,
) -> Result<(), CliError> {
    let store = open_store(context)?;
    let format: export::ExportFormat = format.into();
    let rendered = store.export(format)?;

    if let Some(path) = output_path {
        let path = if path.is_dir() {
            path.join(suggested_export_file_name(format))
        } else {
            path.to_path_buf()
        };
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
