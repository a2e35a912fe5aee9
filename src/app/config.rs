//! Runtime configuration resolved from the command line.

use std::{
    env, io,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use crossterm::tty::IsTty;
use log::LevelFilter;

use crate::app::cli::Cli;

pub const DB_NAME: &str = "tasks.db";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_level: LevelFilter,
    pub color: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> io::Result<Config> {
        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => default_db_path()?,
        };
        Ok(Config {
            db_path,
            log_level: log_level(cli.verbose),
            color: cli.color.enabled(io::stdout().is_tty()),
        })
    }
}

// The database lives next to the installed binary
pub fn default_db_path() -> io::Result<PathBuf> {
    let exe = env::current_exe()?;
    Ok(exe.parent().unwrap_or(Path::new(".")).join(DB_NAME))
}

pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

// Logs go to stderr so they never mix with command output
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}
