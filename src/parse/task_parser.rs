use crate::model::task::Task;

use super::DONE_MARKER;

/// Decode one line of a tasks file.
///
/// The line is trimmed first; blank lines yield `None`. At most one leading
/// [`DONE_MARKER`] is stripped, and its presence sets `completed`.
pub fn decode_line(line: &str) -> Option<Task> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let task = match trimmed.strip_prefix(DONE_MARKER) {
        Some(rest) => Task {
            text: rest.to_string(),
            completed: true,
        },
        None => Task::new(trimmed),
    };
    Some(task)
}

/// Decode every line of a tasks file in order, skipping blank lines.
pub fn parse_task_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Task> {
    lines
        .iter()
        .filter_map(|line| decode_line(line.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_active() {
        assert_eq!(decode_line("Walk dog"), Some(Task::new("Walk dog")));
    }

    #[test]
    fn test_decode_completed() {
        let task = decode_line("[Done] Pay bills").unwrap();
        assert_eq!(task.text, "Pay bills");
        assert!(task.completed);
    }

    #[test]
    fn test_decode_strips_only_one_marker() {
        let task = decode_line("[Done] [Done] twice").unwrap();
        assert!(task.completed);
        assert_eq!(task.text, "[Done] twice");
    }

    #[test]
    fn test_decode_trims_surrounding_whitespace() {
        let task = decode_line("   [Done] Read book  \t").unwrap();
        assert!(task.completed);
        assert_eq!(task.text, "Read book");
    }

    #[test]
    fn test_decode_bare_marker_is_active_text() {
        // Trimming removes the marker's trailing space, so nothing matches
        let task = decode_line("[Done] ").unwrap();
        assert!(!task.completed);
        assert_eq!(task.text, "[Done]");
    }

    #[test]
    fn test_decode_marker_needs_exact_case() {
        let task = decode_line("[done] lowercase").unwrap();
        assert!(!task.completed);
        assert_eq!(task.text, "[done] lowercase");
    }

    #[test]
    fn test_decode_blank() {
        assert_eq!(decode_line(""), None);
        assert_eq!(decode_line("   \t "), None);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let lines = ["[Done] Pay bills", "", "   ", "Walk dog"];
        let tasks = parse_task_lines(&lines);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "Pay bills");
        assert!(tasks[0].completed);
        assert_eq!(tasks[1].text, "Walk dog");
        assert!(!tasks[1].completed);
    }
}
