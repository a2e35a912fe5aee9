// Communication with SQLite
// Philosophy of CRUD lives here
use std::{fs, io, path::Path};

use chrono::Utc;
use log::{debug, trace};
use rusqlite::{params, Connection, Row};

use crate::app::error::TaskError;
use crate::app::models::{ListFilter, NewTask, Task};

const CREATE_TASKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(256) NOT NULL,
    description TEXT,
    is_done BOOLEAN NOT NULL DEFAULT 0,
    created_date DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);";
const SELECT_TASKS: &str = "SELECT id, name, description, is_done, created_date FROM tasks";

pub struct Storage {
    db_con: Connection,
}

impl Storage {
    // Open (or create) the database file and make sure the schema exists
    pub fn open(path: &Path) -> Result<Self, TaskError> {
        debug!("opening database at {}", path.display());
        let storage = Storage {
            db_con: Connection::open(path)?,
        };
        storage.initialize()?;
        Ok(storage)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, TaskError> {
        let storage = Storage {
            db_con: Connection::open_in_memory()?,
        };
        storage.initialize()?;
        Ok(storage)
    }

    // Safe to call on every start, the table is only created when missing
    pub fn initialize(&self) -> Result<(), TaskError> {
        self.db_con.execute(CREATE_TASKS_TABLE, ())?;
        Ok(())
    }

    // CREATE
    pub fn create(&self, task: &NewTask) -> Result<Task, TaskError> {
        let created_date = Utc::now();
        self.db_con.execute(
            "INSERT INTO tasks (name, description, is_done, created_date) VALUES (?1, ?2, 0, ?3);",
            params![task.name(), task.description(), created_date],
        )?;
        let id = self.db_con.last_insert_rowid();
        debug!("created task id={id}");

        Ok(Task {
            id,
            name: task.name().to_string(),
            description: task.description().map(str::to_string),
            is_done: false,
            created_date,
        })
    }

    // READ
    pub fn list_tasks(&self, filter: ListFilter) -> Result<Vec<Task>, TaskError> {
        let sql = match filter {
            ListFilter::All => format!("{SELECT_TASKS} ORDER BY id"),
            ListFilter::Done => format!("{SELECT_TASKS} WHERE is_done ORDER BY id"),
            ListFilter::Pending => format!("{SELECT_TASKS} WHERE NOT is_done ORDER BY id"),
        };
        trace!("listing tasks with {filter:?}");

        let mut stmt = self.db_con.prepare(&sql)?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    pub fn get_by_id(&self, task_id: i64) -> Result<Task, TaskError> {
        let sql = format!("{SELECT_TASKS} WHERE id = ?1");
        match self.db_con.query_row(&sql, [task_id], task_from_row) {
            Ok(task) => Ok(task),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(TaskError::NotFound(task_id)),
            Err(err) => Err(err.into()),
        }
    }

    // UPDATE
    pub fn mark_done(&self, task_id: i64) -> Result<(), TaskError> {
        self.set_done(task_id, true)
    }

    pub fn mark_undone(&self, task_id: i64) -> Result<(), TaskError> {
        self.set_done(task_id, false)
    }

    fn set_done(&self, task_id: i64, is_done: bool) -> Result<(), TaskError> {
        // SQLite counts matched rows, so re-marking an already done task still reports 1
        let changed = self.db_con.execute(
            "UPDATE tasks SET is_done = ?1 WHERE id = ?2;",
            params![is_done, task_id],
        )?;
        if changed == 0 {
            return Err(TaskError::NotFound(task_id));
        }
        debug!("task id={task_id} is_done={is_done}");
        Ok(())
    }

    // DELETE
    pub fn delete_by_id(&self, task_id: i64) -> Result<(), TaskError> {
        let changed = self
            .db_con
            .execute("DELETE FROM tasks WHERE id = ?1;", [task_id])?;
        if changed == 0 {
            return Err(TaskError::NotFound(task_id));
        }
        debug!("deleted task id={task_id}");
        Ok(())
    }

    // Remove the whole database file; false when it was already gone
    pub fn remove_database(path: &Path) -> Result<bool, TaskError> {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("removed database at {}", path.display());
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        is_done: row.get(3)?,
        created_date: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn storage() -> Storage {
        Storage::open_in_memory().unwrap()
    }

    fn add(storage: &Storage, name: &str) -> Task {
        storage.create(&NewTask::new(name, None).unwrap()).unwrap()
    }

    fn ids(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|task| task.id).collect()
    }

    #[rstest]
    fn ids_strictly_increase_and_are_not_reused(storage: Storage) {
        let first = add(&storage, "a");
        let second = add(&storage, "b");
        storage.delete_by_id(second.id).unwrap();
        let third = add(&storage, "c");

        assert!(first.id < second.id);
        assert!(second.id < third.id);
    }

    #[rstest]
    fn create_returns_stored_task(storage: Storage) {
        let before = Utc::now();
        let created = storage
            .create(&NewTask::new("Buy milk", None).unwrap())
            .unwrap();
        let fetched = storage.get_by_id(created.id).unwrap();

        assert_eq!(fetched.name, "Buy milk");
        assert_eq!(fetched.description, None);
        assert!(!fetched.is_done);
        assert_eq!(fetched.created_date, created.created_date);
        assert!(fetched.created_date >= before);
    }

    #[rstest]
    fn filters_select_matching_subsets(storage: Storage) {
        let a = add(&storage, "a");
        let b = add(&storage, "b");
        let c = add(&storage, "c");
        storage.mark_done(b.id).unwrap();

        let pending = storage.list_tasks(ListFilter::Pending).unwrap();
        let done = storage.list_tasks(ListFilter::Done).unwrap();
        let all = storage.list_tasks(ListFilter::All).unwrap();

        assert_eq!(ids(&pending), vec![a.id, c.id]);
        assert_eq!(ids(&done), vec![b.id]);
        assert_eq!(ids(&all), vec![a.id, b.id, c.id]);
        assert!(pending.iter().all(|task| !task.is_done));
        assert!(done.iter().all(|task| task.is_done));
    }

    #[rstest]
    fn done_then_undone_round_trips(storage: Storage) {
        let created = storage
            .create(&NewTask::new("Write report", Some("quarterly".to_string())).unwrap())
            .unwrap();

        storage.mark_done(created.id).unwrap();
        storage.mark_done(created.id).unwrap();
        assert!(storage.get_by_id(created.id).unwrap().is_done);

        storage.mark_undone(created.id).unwrap();
        storage.mark_undone(created.id).unwrap();
        assert_eq!(storage.get_by_id(created.id).unwrap(), created);
    }

    #[rstest]
    fn unknown_ids_are_not_found(storage: Storage) {
        let removed = add(&storage, "gone");
        storage.delete_by_id(removed.id).unwrap();

        for id in [removed.id, 999] {
            assert!(matches!(storage.get_by_id(id), Err(TaskError::NotFound(i)) if i == id));
            assert!(matches!(storage.delete_by_id(id), Err(TaskError::NotFound(_))));
            assert!(matches!(storage.mark_done(id), Err(TaskError::NotFound(_))));
            assert!(matches!(storage.mark_undone(id), Err(TaskError::NotFound(_))));
        }
    }

    #[test]
    fn file_database_persists_and_can_be_removed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.db");

        let id = {
            let storage = Storage::open(&path).unwrap();
            add(&storage, "persisted").id
        };

        // Reopening must not recreate or wipe the table
        let storage = Storage::open(&path).unwrap();
        assert_eq!(storage.get_by_id(id).unwrap().name, "persisted");
        drop(storage);

        assert!(Storage::remove_database(&path).unwrap());
        assert!(!path.exists());
        assert!(!Storage::remove_database(&path).unwrap());
    }

    #[rstest]
    fn initialize_is_idempotent(storage: Storage) {
        add(&storage, "kept");
        storage.initialize().unwrap();
        assert_eq!(storage.list_tasks(ListFilter::All).unwrap().len(), 1);
    }
}
