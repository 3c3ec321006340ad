pub mod fields;
pub mod tags;
pub mod task_line;

pub use fields::{
    extract_context, extract_creation_date, extract_due_date, extract_note, extract_priority,
    extract_project, is_completed,
};
pub use task_line::parse_task_line;
