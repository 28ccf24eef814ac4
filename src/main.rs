use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use pipeline_utils::cli::commands;
use pipeline_utils::cli::config::{CliSettings, DEFAULT_LOG_LEVEL};
use pipeline_utils::cli::logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,

    /// Log level
    #[arg(long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Append log lines to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a YAML config and print it as JSON
    Yaml {
        /// Path to the YAML file
        path: PathBuf,
        /// Print only this dotted key, e.g. data_ingestion.root_dir
        #[arg(long)]
        key: Option<String>,
    },
    /// Load a JSON file and print it
    Json {
        /// Path to the JSON file
        path: PathBuf,
        /// Print only this dotted key
        #[arg(long)]
        key: Option<String>,
    },
    /// Create directories, parents included
    Mkdirs {
        /// Directories to create
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
        /// Do not log each directory
        #[arg(long)]
        quiet: bool,
    },
    /// Print the approximate size of a file in KB
    Size {
        /// Path to the file
        path: PathBuf,
    },
    /// Show the default project layout
    Paths {
        /// Project root
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Create the artifacts, logs and config directories
        #[arg(long)]
        create: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        print_version();
        return Ok(());
    }

    let settings = CliSettings::new(&cli.log_level, cli.log_file.as_deref())?;
    logging::init(&settings)?;

    match cli.command {
        Some(Commands::Yaml { path, key }) => commands::show_yaml(&path, key.as_deref())?,
        Some(Commands::Json { path, key }) => commands::show_json(&path, key.as_deref())?,
        Some(Commands::Mkdirs { dirs, quiet }) => commands::make_dirs(&dirs, quiet)?,
        Some(Commands::Size { path }) => commands::show_size(&path)?,
        Some(Commands::Paths { root, create }) => {
            commands::show_paths(&root, create)?;
        }
        None => {
            println!("{}", <Cli as CommandFactory>::command().render_help());
        }
    }

    Ok(())
}

fn print_version() {
    println!("{}: {}", "pipeline-utils".green(), env!("CARGO_PKG_VERSION").cyan().bold());
}
