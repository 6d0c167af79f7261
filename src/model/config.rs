use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration from tick.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Default tasks file for the CLI and the save/load prompts
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Explicit log location. Defaults to `.tick-recovery.log` beside the tasks file.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        RecoveryConfig {
            enabled: true,
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

/// File name of the recovery log when none is configured
pub const DEFAULT_RECOVERY_FILE: &str = ".tick-recovery.log";

impl Config {
    /// Resolve relative paths against the directory holding the config file
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(file) = self.tasks.file.take() {
            self.tasks.file = Some(absolutize(base, file));
        }
        if let Some(file) = self.recovery.file.take() {
            self.recovery.file = Some(absolutize(base, file));
        }
    }

    /// Where the recovery log lives for the given tasks file, if enabled
    pub fn recovery_log_path(&self, tasks_file: &Path) -> Option<PathBuf> {
        if !self.recovery.enabled {
            return None;
        }
        if let Some(file) = &self.recovery.file {
            return Some(file.clone());
        }
        let dir = tasks_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Some(dir.join(DEFAULT_RECOVERY_FILE))
    }
}

fn absolutize(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
