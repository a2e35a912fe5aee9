// Maps parsed subcommands onto storage operations and prints the outcome
use std::{io::Write, path::Path};

use log::{debug, info};

use crate::app::cli::TaskCommand;
use crate::app::error::TaskError;
use crate::app::models::{ListFilter, NewTask};
use crate::app::render::{self, Layout};
use crate::app::storage::Storage;

// Run one command. Validation and NotFound errors end up as a single printed
// line and count as success; storage and I/O failures are returned.
pub fn run(
    command: &TaskCommand,
    storage: &Storage,
    out: &mut impl Write,
    layout: &Layout,
) -> Result<(), TaskError> {
    debug!("running {command:?}");
    match execute(command, storage, out, layout) {
        Err(err) if err.is_recoverable() => {
            info!("command rejected: {err}");
            writeln!(out, "{}", layout.failure(&err.to_string()))?;
            Ok(())
        }
        other => other,
    }
}

fn execute(
    command: &TaskCommand,
    storage: &Storage,
    out: &mut impl Write,
    layout: &Layout,
) -> Result<(), TaskError> {
    match command {
        TaskCommand::List {
            include_done,
            only_done,
        } => {
            let filter = ListFilter::from_flags(*include_done, *only_done)?;
            let tasks = storage.list_tasks(filter)?;
            render::write_task_list(out, &tasks, layout)?;
        }
        TaskCommand::Show { task_id } => {
            let task = storage.get_by_id(*task_id)?;
            render::write_task(out, &task, layout)?;
        }
        TaskCommand::Add { name, desc } => {
            let new_task = NewTask::new(name.as_str(), desc.clone())?;
            let task = storage.create(&new_task)?;
            let message = format!("Task created successfully (id={}).", task.id);
            writeln!(out, "{}", layout.success(&message))?;
        }
        TaskCommand::Remove { task_id } => {
            storage.delete_by_id(*task_id)?;
            writeln!(out, "{}", layout.success("Task successfully has been deleted."))?;
        }
        TaskCommand::Done { task_id } => {
            storage.mark_done(*task_id)?;
            writeln!(out, "{}", layout.success("Task is now done."))?;
        }
        TaskCommand::Undone { task_id } => {
            storage.mark_undone(*task_id)?;
            writeln!(out, "{}", layout.success("Task is now undone."))?;
        }
    }
    Ok(())
}

// Runs before any connection is opened, so the file is not recreated
pub fn reset(db_path: &Path, out: &mut impl Write, layout: &Layout) -> Result<(), TaskError> {
    if Storage::remove_database(db_path)? {
        writeln!(out, "{}", layout.success("Database has been removed."))?;
    } else {
        writeln!(out, "{}", layout.warning("DB not found, probably already deleted."))?;
    }
    Ok(())
}
