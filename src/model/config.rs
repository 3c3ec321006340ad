use serde::{Deserialize, Serialize};

/// Configuration from `todotxt.toml`, next to the todo file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub notes: NotesConfig,
}

/// Names of the sibling files, resolved against the todo file's directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_done")]
    pub done: String,
    #[serde(default = "default_waiting")]
    pub waiting: String,
    #[serde(default = "default_someday")]
    pub someday: String,
    #[serde(default = "default_todo")]
    pub todo: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            done: default_done(),
            waiting: default_waiting(),
            someday: default_someday(),
            todo: default_todo(),
        }
    }
}

fn default_done() -> String {
    "done.txt".to_string()
}

fn default_waiting() -> String {
    "waiting.txt".to_string()
}

fn default_someday() -> String {
    "someday.txt".to_string()
}

fn default_todo() -> String {
    "todo.txt".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Lines shown when previewing a `note:` file
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            preview_lines: default_preview_lines(),
        }
    }
}

fn default_preview_lines() -> usize {
    500
}
