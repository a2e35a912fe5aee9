use chrono::{DateTime, Utc};

use crate::app::error::TaskError;

// Upper bound for task names, counted in characters
pub const MAX_NAME_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_done: bool,
    pub created_date: DateTime<Utc>,
}

// A task that passed validation but has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    name: String,
    description: Option<String>,
}

impl NewTask {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self, TaskError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaskError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(TaskError::NameTooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }
        Ok(NewTask { name, description })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Which tasks `list` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    /// Only tasks that are not done yet.
    Pending,
    /// Only finished tasks.
    Done,
    /// Everything.
    All,
}

impl ListFilter {
    // `--all` and `--done` can't be combined
    pub fn from_flags(include_done: bool, only_done: bool) -> Result<Self, TaskError> {
        match (include_done, only_done) {
            (true, true) => Err(TaskError::ConflictingFilters),
            (true, false) => Ok(ListFilter::All),
            (false, true) => Ok(ListFilter::Done),
            (false, false) => Ok(ListFilter::Pending),
        }
    }
}
