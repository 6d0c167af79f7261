use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- tick recovery log: append-only
     Deleted tasks and saves that failed are kept here.
     View with: tick recovery
     Safe to delete. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    Write,
    Delete,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Delete => write!(f, "delete"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "write" => Some(RecoveryCategory::Write),
            "delete" => Some(RecoveryCategory::Delete),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// Handle on a recovery log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryLog {
    path: PathBuf,
}

impl RecoveryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecoveryLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a deleted task. `line` is its encoded form.
    pub fn log_task_deletion(&self, line: &str, index: usize) {
        self.log(RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Delete,
            description: "task deleted".to_string(),
            fields: vec![("Position".to_string(), (index + 1).to_string())],
            body: line.to_string(),
        });
    }

    /// Record a save that did not reach disk, keeping the unsaved content.
    pub fn log_write_failure(&self, target: &Path, error: &io::Error, content: &str) {
        self.log(RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Write,
            description: "save failed".to_string(),
            fields: vec![
                ("Target".to_string(), target.display().to_string()),
                ("Error".to_string(), error.to_string()),
            ],
            body: content.to_string(),
        });
    }

    /// Append an entry. Errors are swallowed and printed to stderr.
    pub fn log(&self, entry: RecoveryEntry) {
        if let Err(e) = append_entry(&self.path, &entry) {
            eprintln!("warning: could not write to recovery log: {}", e);
        }
    }
}

// ---------------------------------------------------------------------------
// Entry formatting
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            let fence = body_fence(&self.body);
            out.push_str(&format!("{}text\n", fence));
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push('\n');
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }

    /// Serialize to a JSON value for `tick recovery --json`.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }

    /// Human-readable form, identical to the on-disk block.
    pub fn to_display_markdown(&self) -> String {
        self.to_markdown()
    }
}

/// A backtick fence longer than any backtick run inside `body`, minimum three.
fn body_fence(body: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in body.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

/// Length of the backtick run opening `line`, if it is a fence.
fn fence_len(line: &str) -> Option<usize> {
    let n = line.len() - line.trim_start_matches('`').len();
    (n >= 3).then_some(n)
}

fn append_entry(path: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    let needs_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read entries from the log, most recent first. A missing log reads as empty.
pub fn read_recovery_entries(path: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);

    // Entries are parsed oldest-first
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries = entries.into_iter().skip(skip).collect();
    }

    entries.reverse();
    entries
}

fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut open_fence: Option<usize> = None;

        for line in lines.by_ref() {
            if let Some(len) = open_fence {
                // Closes only on a bare fence at least as long as the opener
                if line.len() >= len && line.bytes().all(|b| b == b'`') {
                    open_fence = None;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }

            if line == "---" {
                break;
            }
            if let Some(len) = fence_len(line) {
                open_fence = Some(len);
                continue;
            }

            let trimmed = line.trim();
            if let Some((key, value)) = trimmed.split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(' ')?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);

    let (category_str, description) = rest.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category_str)?;

    Some((timestamp, category, description.to_string()))
}
