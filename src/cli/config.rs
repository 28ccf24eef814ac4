use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::LevelFilter;

pub const CONFIG_FILE_PATH: &str = "config/config.yaml";
pub const PARAMS_FILE_PATH: &str = "params.yaml";
pub const ARTIFACTS_ROOT: &str = "artifacts";
pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "running_logs.log";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(path: &str) -> PathBuf {
    shellexpand::tilde(path).into_owned().into()
}

/// Conventional file layout of a pipeline project, relative to its root
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub config_file: PathBuf,
    pub params_file: PathBuf,
    pub artifacts_root: PathBuf,
    pub log_dir: PathBuf,
}

impl ProjectPaths {
    pub fn under(root: &Path) -> Self {
        Self {
            config_file: root.join(CONFIG_FILE_PATH),
            params_file: root.join(PARAMS_FILE_PATH),
            artifacts_root: root.join(ARTIFACTS_ROOT),
            log_dir: root.join(LOG_DIR),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Directories a fresh project needs before any stage runs
    pub fn directories(&self) -> Vec<&Path> {
        let mut dirs = vec![self.artifacts_root.as_path(), self.log_dir.as_path()];
        if let Some(config_dir) = self.config_file.parent() {
            dirs.push(config_dir);
        }
        dirs
    }
}

/// Logging settings taken from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct CliSettings {
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl CliSettings {
    pub fn new(log_level: &str, log_file: Option<&str>) -> Result<Self> {
        let log_level = LevelFilter::from_str(log_level.trim())
            .map_err(|_| anyhow!("Unknown log level: {}", log_level))?;
        Ok(Self {
            log_level,
            log_file: log_file.map(expand_path),
        })
    }
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}
