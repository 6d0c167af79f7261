pub mod task_parser;
pub mod task_serializer;

/// Prefix marking a completed task, both on screen and on disk
pub const DONE_MARKER: &str = "[Done] ";

pub use task_parser::{decode_line, parse_task_lines};
pub use task_serializer::{encode_task, serialize_tasks};
