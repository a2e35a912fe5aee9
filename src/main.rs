use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use app::cli::{Cli, Command};
use app::config::{init_logging, Config};
use app::render::Layout;
use app::storage::Storage;

mod app;

// Parse one command, run it against the task database and exit.
// The connection lives until the end of main and is dropped on every path.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli).context("Failed to resolve the configuration")?;
    init_logging(config.log_level);
    debug!("using database {}", config.db_path.display());

    let layout = Layout::detect(config.color);
    let mut out = io::stdout().lock();

    match &cli.command {
        Command::Reset => app::commands::reset(&config.db_path, &mut out, &layout)
            .with_context(|| format!("Failed to remove {}", config.db_path.display()))?,
        Command::Task(command) => {
            let storage = Storage::open(&config.db_path).with_context(|| {
                format!("Failed to open the DB file {}", config.db_path.display())
            })?;
            app::commands::run(command, &storage, &mut out, &layout)
                .with_context(|| format!("Failed to run `{}`", command.name()))?;
        }
    }

    Ok(())
}
