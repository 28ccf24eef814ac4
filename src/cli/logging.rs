use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;

use super::config::CliSettings;

/// Install the process-wide logger. Call once, before any file utility runs.
///
/// `RUST_LOG`, when set, overrides the level from `settings`.
pub fn init(settings: &CliSettings) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(settings.log_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}: {}: {}: {}]",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            record.level(),
            record.module_path().unwrap_or("-"),
            record.args()
        )
    });

    if let Some(log_file) = &settings.log_file {
        if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory at {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger was already initialised")?;
    Ok(())
}
