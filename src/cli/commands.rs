use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use colored::*;

use crate::cli::config::ProjectPaths;
use crate::models::ConfigBox;
use crate::utils::file_utils::{create_directories, get_size, load_json, read_yaml};

/// Render a loaded config, or a single dotted key of it, as pretty JSON
pub fn render_config(config: &ConfigBox, key: Option<&str>) -> Result<String> {
    match key {
        None => Ok(config.to_string()),
        Some(key) => {
            let value = config
                .lookup(key)
                .ok_or_else(|| anyhow!("Key '{}' not found", key))?;
            Ok(serde_json::to_string_pretty(value)?)
        }
    }
}

pub fn show_yaml(path: &Path, key: Option<&str>) -> Result<()> {
    let config = read_yaml(path)
        .with_context(|| format!("Failed to read yaml config {}", path.display()))?;
    println!("{}", render_config(&config, key)?);
    Ok(())
}

pub fn show_json(path: &Path, key: Option<&str>) -> Result<()> {
    let config = load_json(path)
        .with_context(|| format!("Failed to read json file {}", path.display()))?;
    println!("{}", render_config(&config, key)?);
    Ok(())
}

pub fn make_dirs(dirs: &[PathBuf], quiet: bool) -> Result<()> {
    create_directories(dirs, !quiet)?;
    if !quiet {
        println!("{} {}", "created".green(), dirs.len());
    }
    Ok(())
}

pub fn show_size(path: &Path) -> Result<()> {
    let size = get_size(path)
        .with_context(|| format!("Failed to read size of {}", path.display()))?;
    println!("{}: {}", path.display().to_string().cyan(), size);
    Ok(())
}

/// Print the conventional project layout and optionally create its directories
pub fn show_paths(root: &Path, create: bool) -> Result<ProjectPaths> {
    let paths = ProjectPaths::under(root);
    println!("{}: {}", "config".green(), paths.config_file.display());
    println!("{}: {}", "params".green(), paths.params_file.display());
    println!("{}: {}", "artifacts".green(), paths.artifacts_root.display());
    println!("{}: {}", "logs".green(), paths.log_file().display());

    if create {
        create_directories(paths.directories(), true)?;
    }
    Ok(paths)
}
