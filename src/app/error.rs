//! Error taxonomy for task operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// `--all` and `--done` were passed together.
    #[error("Only one of -d or -a can be used at the same time.")]
    ConflictingFilters,

    /// The task name is empty after trimming.
    #[error("Task name must not be empty.")]
    EmptyName,

    /// The task name exceeds the column bound.
    #[error("Task name is {len} characters long, at most {max} are allowed.")]
    NameTooLong { len: usize, max: usize },

    /// No stored task has this id.
    #[error("Task with id={0} does not exist in the DB.")]
    NotFound(i64),

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    // Validation and lookup failures are reported to the user and the
    // process exits normally; everything else is fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TaskError::ConflictingFilters
                | TaskError::EmptyName
                | TaskError::NameTooLong { .. }
                | TaskError::NotFound(_)
        )
    }
}
