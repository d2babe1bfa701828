//! Jotpad CLI - Command-line interface for rich notes
//!
//! Every command opens the note store, applies one operation and exits; the
//! store persists the whole collection after each change.

mod cli;
mod commands;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::attach::run_attach;
use crate::commands::common::StoreContext;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::list::run_list;
use crate::commands::new::run_new;
use crate::commands::search::run_search;
use crate::commands::show::run_show;
use crate::commands::sub::run_sub;
use crate::commands::write::run_write;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "jotpad_core=warn,jotpad=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell, output } = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let context = StoreContext::resolve(cli.db_path, cli.config)?;
    tracing::debug!("Using database at {}", context.db_path.display());

    match cli.command {
        Commands::New { title, content } => run_new(title.as_deref(), &content, &context)?,
        Commands::List { limit, json } => run_list(limit, json, &context)?,
        Commands::Show { id, raw, json } => run_show(&id, raw, json, &context)?,
        Commands::Edit { id, title, content } => {
            run_edit(&id, title.as_deref(), content.as_deref(), &context)?;
        }
        Commands::Write { id } => run_write(&id, &context).await?,
        Commands::Delete { id, yes } => run_delete(&id, yes, &context)?,
        Commands::Search { query, json } => run_search(&query, json, &context)?,
        Commands::Sub { command } => run_sub(&command, &context)?,
        Commands::Attach { id, file } => run_attach(&id, &file, &context)?,
        Commands::Export { format, output } => {
            run_export(format, output.as_deref(), &context)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
