use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Name of the config file looked up from the working directory upward
pub const CONFIG_FILE: &str = "tick.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Find `tick.toml` by walking up from the given directory.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read and parse a config file, resolving its relative paths.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }
    Ok(config)
}

/// Load the config: an explicit path must exist; otherwise discovery from
/// `cwd` is attempted and defaults apply when nothing is found.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match discover_config(cwd) {
            Some(path) => read_config(&path),
            None => Ok(Config::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();
        assert_eq!(discover_config(&sub), Some(tmp.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert!(config.tasks.file.is_none());
        assert!(config.recovery.enabled);
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[tasks]\nfile = \"home.txt\"\n",
        )
        .unwrap();
        let sub = tmp.path().join("deep");
        fs::create_dir_all(&sub).unwrap();
        let config = load_config(None, &sub).unwrap();
        assert_eq!(config.tasks.file, Some(tmp.path().join("home.txt")));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("nope.toml")), tmp.path());
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "[tasks\nfile = 3").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
