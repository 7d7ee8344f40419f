mod commands;
mod error;
mod paths;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use simplelog::{Config, LevelFilter, WriteLogger};
use weft::config::WeftConfig;

use crate::commands::{ColumnSpec, KeySpec, NavigateArgs};
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "weft", about = "Headless table and chart toolkit")]
struct Cli {
    /// Options file (defaults to config.json in the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log file (defaults to latest.log in the platform cache directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge an override chart config over a base config
    Merge { base: PathBuf, patch: PathBuf },

    /// Compute pinned column offsets
    Pin {
        /// Column as id:side:width, e.g. name:left:120
        #[arg(long = "column", required = true)]
        columns: Vec<ColumnSpec>,
    },

    /// Replay keys over a headless table
    Navigate {
        #[arg(long)]
        rows: usize,

        #[arg(long)]
        page_size: Option<usize>,

        /// Enable Space/Escape selection handling
        #[arg(long)]
        select: bool,

        /// Comma-separated keys, e.g. down,down,space,ctrl+pagedown
        #[arg(long, value_delimiter = ',', required = true)]
        keys: Vec<KeySpec>,
    },
}

fn init_logging(path: Option<&Path>, level: LevelFilter) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match paths::log_file() {
            Some(path) => path,
            None => return Ok(()),
        },
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), file)?;
    log::info!("[weft] logging to {}", path.display());
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<WeftConfig> {
    if let Some(path) = path {
        return Ok(WeftConfig::load(path)?);
    }
    match paths::config_file() {
        Some(default) if default.exists() => Ok(WeftConfig::load(default)?),
        _ => Ok(WeftConfig::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_file.as_deref(), cli.log_level)?;
    let config = load_config(cli.config.as_deref())?;
    log::debug!("[weft] {:?}", cli.command);

    let output = match cli.command {
        Command::Merge { base, patch } => commands::merge_files(&base, &patch)?,
        Command::Pin { columns } => commands::pin(&columns),
        Command::Navigate {
            rows,
            page_size,
            select,
            keys,
        } => commands::navigate(
            &NavigateArgs {
                rows,
                page_size,
                select,
                keys,
            },
            &config,
        ),
    };
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("[weft] {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
