use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "jotpad")]
#[command(about = "Rich notes with sub-notes, kept in a local snapshot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to store config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "add")]
    New {
        /// Note title
        #[arg(short, long)]
        title: Option<String>,
        /// Note content (markup allowed); read from stdin when piped
        content: Vec<String>,
    },
    /// List notes, most recent first
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one note
    Show {
        /// Note ID or unique ID prefix
        id: String,
        /// Print content markup instead of plain text
        #[arg(long, conflicts_with = "json")]
        raw: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a note's title and content
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New title (blank resets to the placeholder)
        #[arg(short, long)]
        title: Option<String>,
        /// New content; opens $EDITOR when neither --title nor --content is given
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Append lines from stdin to a note, saving after each pause
    Write {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Delete a note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search titles and content
    Search {
        /// Search query (empty lists every note)
        #[arg(default_value = "")]
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage a note's sub-notes
    Sub {
        #[command(subcommand)]
        command: SubCommands,
    },
    /// Embed an image file into a note
    Attach {
        /// Note ID or unique ID prefix
        id: String,
        /// Image file to embed
        file: PathBuf,
    },
    /// Export all notes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Append a sub-note
    Add {
        /// Note ID or unique ID prefix
        id: String,
        /// Sub-note text
        text: Vec<String>,
    },
    /// Remove a sub-note
    Remove {
        /// Note ID or unique ID prefix
        id: String,
        /// Sub-note ID or unique ID prefix
        sub_id: String,
    },
    /// Replace a sub-note's text
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// Sub-note ID or unique ID prefix
        sub_id: String,
        /// New text
        text: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for jotpad_core::export::ExportFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}
