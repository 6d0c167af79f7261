use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for reading or writing a tasks file
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

impl PersistenceError {
    /// The underlying I/O error, whose message is shown to the user verbatim
    pub fn io_error(&self) -> &io::Error {
        match self {
            PersistenceError::Read { source, .. } | PersistenceError::Write { source, .. } => {
                source
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            PersistenceError::Read { path, .. } | PersistenceError::Write { path, .. } => path,
        }
    }
}

/// Line-oriented access to a tasks file
pub trait FileStore {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;
    fn write_lines(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// `FileStore` backed by the local filesystem. Writes are atomic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FileStore for FsStore {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let content = fs::read_to_string(path)?;
        Ok(content.lines().map(|l| l.to_string()).collect())
    }

    fn write_lines(&self, path: &Path, content: &str) -> io::Result<()> {
        atomic_write(path, content.as_bytes())
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
