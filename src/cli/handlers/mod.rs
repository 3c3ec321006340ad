use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::document_io::{self, DocumentError};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::config::Config;
use crate::model::document::{LineSelection, check_in_range, is_blank, split_lines};
use crate::model::task::parse_date;
use crate::ops::complete::complete_tags;
use crate::ops::decorate::compute_decorations;
use crate::ops::mutate::{LineMutation, mutate_document};
use crate::ops::notes::{first_note, open_or_create_note, read_note_preview, resolve_note_path};
use crate::ops::relocate::{Destination, Relocation, relocate, task_count};
use crate::ops::sort::{SortField, sort_document};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Default todo file name, looked up from the working directory upwards
const TODO_FILE: &str = "todo.txt";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let session = Session::open(cli.file.as_deref(), cli.today.as_deref(), cli.json)?;

    match cli.command {
        // Read commands
        Commands::Highlight => cmd_highlight(&session),
        Commands::Tags(args) => cmd_tags(&session, args),
        Commands::Note(args) => cmd_note(&session, args),

        // Write commands
        Commands::Sort(args) => cmd_sort(&session, args),
        Commands::Toggle(args) => {
            cmd_mutate(&session, LineMutation::ToggleCompletion, &args.lines)
        }
        Commands::Priority(args) => {
            let mutation = parse_priority_action(&args.action)?;
            cmd_mutate(&session, mutation, &args.lines)
        }
        Commands::Archive => cmd_relocate(&session, Relocation::Archive),
        Commands::Move(args) => {
            let destination: Destination = args.destination.parse()?;
            let selections = parse_selections(&args.lines, session.line_count())?;
            cmd_relocate(
                &session,
                Relocation::Move {
                    destination,
                    selections,
                },
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Session: the open document plus everything resolved around it
// ---------------------------------------------------------------------------

struct Session {
    /// Backing file; `None` when the document came from stdin
    path: Option<PathBuf>,
    text: String,
    config: Config,
    today: NaiveDate,
    json: bool,
}

impl Session {
    fn open(
        file: Option<&str>,
        today: Option<&str>,
        json: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let today = match today {
            Some(s) => parse_date(s)
                .ok_or_else(|| format!("invalid --today date '{}' (expected YYYY-MM-DD)", s))?,
            None => chrono::Local::now().date_naive(),
        };

        let file = file
            .map(String::from)
            .or_else(|| std::env::var("TODO_FILE").ok().filter(|v| !v.is_empty()));

        let (path, text) = match file.as_deref() {
            Some("-") => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                (None, text)
            }
            Some(f) => {
                let path = PathBuf::from(f);
                let text = document_io::read_document(&path)?;
                (Some(path), text)
            }
            None => {
                let cwd = std::env::current_dir()?;
                let path = document_io::discover_document(&cwd, TODO_FILE)?;
                let text = document_io::read_document(&path)?;
                (Some(path), text)
            }
        };

        let mut session = Session {
            path,
            text,
            config: Config::default(),
            today,
            json,
        };
        session.config = config_io::load_config(&session.base_dir())?;
        tracing::debug!(
            path = ?session.path,
            today = %session.today,
            "opened document"
        );
        Ok(session)
    }

    /// Directory sibling files and notes resolve against
    fn base_dir(&self) -> PathBuf {
        match &self.path {
            Some(path) => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
            None => PathBuf::from("."),
        }
    }

    fn line_count(&self) -> usize {
        split_lines(&self.text).len()
    }

    /// Replace the document: write the file, or print the text in stdin mode.
    fn commit(&self, text: &str) -> Result<(), DocumentError> {
        match &self.path {
            Some(path) => document_io::save_document(path, text),
            None => {
                println!("{}", text);
                Ok(())
            }
        }
    }

    /// Print a write command's status, as text or JSON. It goes to stderr
    /// when stdout carries the document.
    fn report(&self, status: StatusJson) -> CmdResult {
        let out = if self.json {
            serde_json::to_string(&status)?
        } else {
            status.message
        };
        if self.path.is_some() {
            println!("{}", out);
        } else {
            eprintln!("{}", out);
        }
        Ok(())
    }
}

fn parse_selections(
    specs: &[String],
    line_count: usize,
) -> Result<Vec<LineSelection>, Box<dyn std::error::Error>> {
    let selections = specs
        .iter()
        .map(|s| s.parse::<LineSelection>())
        .collect::<Result<Vec<_>, _>>()?;
    check_in_range(&selections, line_count)?;
    Ok(selections)
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_sort(session: &Session, args: SortArgs) -> CmdResult {
    let field: SortField = args.field.parse()?;
    let sorted = sort_document(&session.text, field);
    let count = split_lines(&sorted).iter().filter(|l| !is_blank(l)).count();
    session.commit(&sorted)?;
    session.report(StatusJson {
        message: format!("Sorted {} by {}", task_count(count), field),
        count,
        target: None,
    })
}

fn cmd_mutate(session: &Session, mutation: LineMutation, specs: &[String]) -> CmdResult {
    let selections = parse_selections(specs, session.line_count())?;
    let (text, changed) = mutate_document(&session.text, &selections, mutation, session.today);
    if changed > 0 || session.path.is_none() {
        session.commit(&text)?;
    }
    session.report(StatusJson {
        message: format_updated(changed),
        count: changed,
        target: None,
    })
}

fn cmd_relocate(session: &Session, relocation: Relocation) -> CmdResult {
    let outcome = relocate(
        session.path.as_deref(),
        &session.text,
        &relocation,
        &session.config.files,
    )?;

    if let Err(e) = session.commit(&outcome.text) {
        // The sibling file already holds the moved lines
        recovery::log_recovery(
            &session.base_dir(),
            RecoveryEntry {
                timestamp: chrono::Utc::now(),
                category: RecoveryCategory::Relocate,
                description: "source not rewritten after relocation".to_string(),
                fields: vec![
                    ("Target".to_string(), outcome.target.display().to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                body: outcome.moved.join("\n"),
            },
        );
        return Err(e.into());
    }

    session.report(StatusJson {
        message: outcome.message,
        count: outcome.moved.len(),
        target: Some(outcome.target.display().to_string()),
    })
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_highlight(session: &Session) -> CmdResult {
    let decorations = compute_decorations(&session.text, session.today, &session.base_dir());
    if session.json {
        let items: Vec<HighlightJson> = decorations
            .iter()
            .map(|d| highlight_to_json(&session.text, d))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    for decoration in &decorations {
        println!("{}", format_highlight(&session.text, decoration));
    }
    Ok(())
}

fn cmd_tags(session: &Session, args: TagsArgs) -> CmdResult {
    let trigger = parse_trigger(&args.trigger)?;
    let tags = complete_tags(&session.text, trigger);
    if session.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&TagsJson { trigger, tags })?
        );
        return Ok(());
    }
    for tag in &tags {
        println!("{}", tag);
    }
    Ok(())
}

fn cmd_note(session: &Session, args: NoteArgs) -> CmdResult {
    let lines = split_lines(&session.text);
    let line = args
        .line
        .checked_sub(1)
        .and_then(|idx| lines.get(idx))
        .ok_or_else(|| {
            format!(
                "line {} is past the end of the file ({} lines)",
                args.line,
                lines.len()
            )
        })?;
    let note =
        first_note(line).ok_or_else(|| format!("no note: reference on line {}", args.line))?;
    let path = resolve_note_path(&session.base_dir(), &note.name);

    let created = if args.create {
        open_or_create_note(&path)
            .map_err(|e| format!("could not create {}: {}", path.display(), e))?
    } else {
        false
    };
    let exists = path.is_file();
    let preview = if exists {
        read_note_preview(&path, session.config.notes.preview_lines)
            .map_err(|e| format!("could not read {}: {}", path.display(), e))?
    } else {
        None
    };

    if session.json {
        let out = NoteJson {
            note: note.name,
            path: path.display().to_string(),
            exists,
            created,
            preview,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", path.display());
    if created {
        println!("(created)");
    }
    match (exists, preview) {
        (false, _) => println!("(missing, use --create to make it)"),
        (true, None) => println!("<EMPTY FILE>"),
        (true, Some(text)) => println!("{}", text),
    }
    Ok(())
}
