use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::app::config::ColorMode;

/// Simple Todo List Program
///
/// Stores added TODO in sqlite DB.
#[derive(Parser, Debug)]
#[command(name = "todoer", version)]
pub struct Cli {
    /// Path to the database file [default: tasks.db next to the executable]
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log more on stderr; repeat for more detail
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// When to color the output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    #[command(flatten)]
    Task(TaskCommand),

    /// Deletes the database file together with every task in it.
    Reset,
}

// Commands that work on an open database
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// By default returns list of tasks with Not Done status.
    ///
    /// See the options for listing all of them or only done tasks.
    List {
        /// Shows all tasks, including done ones.
        #[arg(short = 'a', long = "all")]
        include_done: bool,

        /// Only shows done tasks.
        #[arg(short = 'd', long = "done")]
        only_done: bool,
    },

    /// Show single task using its task_id.
    Show { task_id: i64 },

    /// Adds new task to the DB.
    Add {
        /// Name for the task.
        #[arg(long)]
        name: String,

        /// Description for the task.
        #[arg(long)]
        desc: Option<String>,
    },

    /// Removes a task from DB by the given task_id.
    Remove { task_id: i64 },

    /// Marks a task as done in DB for the given task_id.
    Done { task_id: i64 },

    /// Marks a task as undone for the given task_id.
    Undone { task_id: i64 },
}

impl TaskCommand {
    // Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            TaskCommand::List { .. } => "list",
            TaskCommand::Show { .. } => "show",
            TaskCommand::Add { .. } => "add",
            TaskCommand::Remove { .. } => "remove",
            TaskCommand::Done { .. } => "done",
            TaskCommand::Undone { .. } => "undone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("todoer").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_flags_are_parsed_but_not_validated() {
        let cli = parse(&["list", "-a", "--done"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Task(TaskCommand::List {
                include_done: true,
                only_done: true,
            })
        );
    }

    #[test]
    fn add_requires_name() {
        assert!(parse(&["add", "--desc", "no name"]).is_err());

        let cli = parse(&["add", "--name", "Buy milk"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Task(TaskCommand::Add {
                name: "Buy milk".to_string(),
                desc: None,
            })
        );
    }

    #[test]
    fn task_id_must_be_an_integer() {
        assert!(parse(&["show", "abc"]).is_err());
        assert!(parse(&["done", "1.5"]).is_err());
        let cli = parse(&["undone", "12"]).unwrap();
        assert_eq!(cli.command, Command::Task(TaskCommand::Undone { task_id: 12 }));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&["reset", "--db", "/tmp/x.db", "-vv", "--color", "never"]).unwrap();
        assert_eq!(cli.command, Command::Reset);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorMode::Never);
    }

    #[test]
    fn command_names_match_subcommands() {
        for name in ["list", "show 1", "add --name x", "remove 1", "done 1", "undone 1"] {
            let args: Vec<&str> = name.split(' ').collect();
            match parse(&args).unwrap().command {
                Command::Task(command) => assert_eq!(command.name(), args[0]),
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }
}
