use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("todo v", env!("CARGO_PKG_VERSION"), " - keep a todo.txt in order"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Todo file to work on; `-` reads stdin and writes the result to stdout
    /// (default: $TODO_FILE, else todo.txt in this or a parent directory)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,

    /// Date to treat as today (YYYY-MM-DD, default: local date)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sort tasks by a field (priority, due, created, context, project, status)
    Sort(SortArgs),
    /// Mark tasks complete, or reopen completed ones
    Toggle(LinesArgs),
    /// Raise, lower, or remove task priority
    Priority(PriorityArgs),
    /// Move completed tasks to the done file
    Archive,
    /// Move tasks to the someday, waiting, or todo file
    Move(MoveArgs),
    /// List due-date and note highlights
    Highlight,
    /// List known contexts (@) or projects (+)
    Tags(TagsArgs),
    /// Show or create the note referenced on a line
    Note(NoteArgs),
}

#[derive(Args)]
pub struct SortArgs {
    /// Field to sort by
    pub field: String,
}

#[derive(Args)]
pub struct LinesArgs {
    /// Lines to act on: N or N-M, counting from 1
    #[arg(required = true)]
    pub lines: Vec<String>,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Action: "up", "down", or "rm"
    pub action: String,
    /// Lines to act on: N or N-M, counting from 1
    #[arg(required = true)]
    pub lines: Vec<String>,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Destination: "someday", "waiting", or "todo"
    pub destination: String,
    /// Lines to move: N or N-M, counting from 1
    #[arg(required = true)]
    pub lines: Vec<String>,
}

#[derive(Args)]
pub struct TagsArgs {
    /// "@" for contexts, "+" for projects
    pub trigger: String,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Line holding the note: reference (counting from 1)
    pub line: usize,
    /// Create the note file if it does not exist
    #[arg(long)]
    pub create: bool,
}
