use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use jotpad_core::markup::snippet;
use jotpad_core::util::{normalize_text_option, truncate_with_ellipsis};
use jotpad_core::{Note, NoteId, NoteStore, SqliteKeyValueStore, StoreConfig, SubNoteId};
use serde::Serialize;

use crate::error::CliError;

/// Where the note database lives and how the store is configured.
#[derive(Debug, Clone)]
pub struct StoreContext {
    pub db_path: PathBuf,
    pub config: StoreConfig,
}

impl StoreContext {
    pub fn resolve(
        cli_db_path: Option<PathBuf>,
        cli_config_path: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let config_path = resolve_config_path(cli_config_path);
        let config = StoreConfig::load_from_path(&config_path)?;
        tracing::debug!("Using config from {}", config_path.display());

        Ok(Self {
            db_path: resolve_db_path(cli_db_path),
            config,
        })
    }
}

pub type CliNoteStore = NoteStore<SqliteKeyValueStore>;

pub fn open_store(context: &StoreContext) -> Result<CliNoteStore, CliError> {
    let backend = SqliteKeyValueStore::open(&context.db_path)?;
    Ok(NoteStore::open(backend, context.config.clone())?)
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
    pub subnote_count: usize,
    pub current: bool,
}

pub fn note_to_list_item(note: &Note, current: Option<&NoteId>) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();

    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: snippet(&note.content, 80),
        created_at: note.created_at,
        updated_at: note.updated_at,
        relative_time: format_relative_time(note.updated_at, now_ms),
        subnote_count: note.subnotes.len(),
        current: current == Some(&note.id),
    }
}

pub fn format_note_lines<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
    current: Option<&NoteId>,
) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .into_iter()
        .map(|note| {
            let marker = if current == Some(&note.id) { '*' } else { ' ' };
            let id = note.id.as_str();
            let title = truncate_with_ellipsis(&note.title, 24);
            let preview = snippet(&note.content, 40);
            let relative_time = format_relative_time(note.updated_at, now_ms);

            let line = format!("{marker} {id:<36}  {title:<25}  {preview:<41}  {relative_time}");
            match note.subnotes.len() {
                0 => line,
                1 => format!("{line}  (1 sub-note)"),
                count => format!("{line}  ({count} sub-notes)"),
            }
        })
        .collect()
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

enum PrefixMatch<'a> {
    Unique(&'a str),
    Missing,
    Ambiguous(Vec<&'a str>),
}

fn match_id_prefix<'a, I>(query: &str, ids: I) -> PrefixMatch<'a>
where
    I: Iterator<Item = &'a str> + Clone,
{
    if let Some(exact) = ids.clone().find(|id| *id == query) {
        return PrefixMatch::Unique(exact);
    }

    let matches = ids.filter(|id| id.starts_with(query)).collect::<Vec<_>>();
    match matches.len() {
        0 => PrefixMatch::Missing,
        1 => PrefixMatch::Unique(matches[0]),
        _ => PrefixMatch::Ambiguous(matches),
    }
}

fn ambiguous_message(query: &str, matches: &[&str]) -> String {
    let options = matches
        .iter()
        .take(3)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    format!("ID prefix '{query}' is ambiguous; matches: {options}")
}

/// Resolve a full note id or a unique id prefix.
pub fn resolve_note_id(query: &str, notes: &[Note]) -> Result<NoteId, CliError> {
    let query = normalize_note_identifier(query)?;
    match match_id_prefix(&query, notes.iter().map(|note| note.id.as_str())) {
        PrefixMatch::Unique(id) => Ok(NoteId::from(id)),
        PrefixMatch::Missing => Err(CliError::NoteNotFound(query)),
        PrefixMatch::Ambiguous(matches) => {
            Err(CliError::AmbiguousId(ambiguous_message(&query, &matches)))
        }
    }
}

/// Resolve a full sub-note id or a unique id prefix within one note.
pub fn resolve_subnote_id(query: &str, note: &Note) -> Result<SubNoteId, CliError> {
    let query = normalize_note_identifier(query)?;
    match match_id_prefix(&query, note.subnotes.iter().map(|sub| sub.id.as_str())) {
        PrefixMatch::Unique(id) => Ok(SubNoteId::from(id)),
        PrefixMatch::Missing => Err(CliError::SubnoteNotFound(query)),
        PrefixMatch::Ambiguous(matches) => {
            Err(CliError::AmbiguousId(ambiguous_message(&query, &matches)))
        }
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Content from arguments, falling back to piped stdin.
pub fn resolve_note_content(content_parts: &[String]) -> Result<Option<String>, CliError> {
    if let Some(content) = normalize_text_option(Some(content_parts.join(" "))) {
        return Ok(Some(content));
    }
    read_piped_stdin()
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_text_option(Some(buffer)))
}

/// Ask for a yes/no answer on the terminal. Non-interactive stdin refuses.
pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(CliError::ConfirmationRequired);
    }

    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn capture_editor_input_with_initial(initial_content: &str) -> Result<String, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(note_content.trim_end().to_string())
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("jotpad-note-{}-{now}.html", std::process::id()))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("JOTPAD_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jotpad")
        .join("jotpad.db")
}

pub fn resolve_config_path(cli_config_path: Option<PathBuf>) -> PathBuf {
    cli_config_path
        .or_else(|| env::var_os("JOTPAD_CONFIG").map(PathBuf::from))
        .unwrap_or_else(default_config_path)
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jotpad")
        .join("config.json")
}
