// SQLite-backed task table

use crate::models::{Task, TaskPatch};
use eyre::{Context, Result, eyre};
use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SCHEMA_VERSION: u32 = 1;

/// Durable task table with a process-lifetime SQLite connection
pub struct Store {
    base_path: PathBuf,
    db: Connection,
}

impl Store {
    /// Open or create a store at the given directory
    ///
    /// Opening is idempotent: the schema is created if missing and the
    /// version stamp is written on first open.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        // Create directory if it doesn't exist
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;

        let db_path = base_path.join("taskdb.sqlite");
        let db = Connection::open(&db_path).context("Failed to open SQLite database")?;

        let store = Self { base_path, db };
        store.create_schema()?;

        Ok(store)
    }

    /// Get the base path of this store
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get a reference to the SQLite database connection
    pub fn db(&self) -> &Connection {
        &self.db
    }

    /// Create schema and stamp the version
    fn create_schema(&self) -> Result<()> {
        let version: u32 = self
            .db
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version > SCHEMA_VERSION {
            return Err(eyre!(
                "Store schema version {} is newer than supported version {}",
                version,
                SCHEMA_VERSION
            ));
        }

        debug!(version, "Creating database schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                due_date TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                alarm INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_title ON tasks(title);
            CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date);
            CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed);
            CREATE INDEX IF NOT EXISTS idx_tasks_alarm ON tasks(alarm);
            "#,
        )?;

        if version < SCHEMA_VERSION {
            self.db
                .execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
        }

        Ok(())
    }

    /// Insert a new task and return the store-assigned id
    ///
    /// Any id on the passed task is ignored; assignment is store-controlled.
    pub fn insert(&self, task: &Task) -> Result<i64> {
        self.db
            .execute(
                "INSERT INTO tasks (title, description, due_date, completed, alarm)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    task.title,
                    task.description,
                    task.due_date,
                    task.completed,
                    task.alarm
                ],
            )
            .context("Failed to insert task")?;

        let id = self.db.last_insert_rowid();
        debug!(id, "Inserted task");
        Ok(id)
    }

    /// Merge the supplied fields onto the task matching `id`
    ///
    /// Returns the number of rows changed: 0 when `id` is absent or the
    /// patch is empty, 1 otherwise. No field validation happens here.
    pub fn update(&self, id: i64, patch: &TaskPatch) -> Result<usize> {
        let mut sets: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(title) = &patch.title {
            sets.push("title = ?");
            params.push(Box::new(title.clone()));
        }
        if let Some(description) = &patch.description {
            sets.push("description = ?");
            params.push(Box::new(description.clone()));
        }
        if let Some(due_date) = &patch.due_date {
            sets.push("due_date = ?");
            params.push(Box::new(due_date.clone()));
        }
        if let Some(completed) = patch.completed {
            sets.push("completed = ?");
            params.push(Box::new(completed));
        }
        if let Some(alarm) = patch.alarm {
            sets.push("alarm = ?");
            params.push(Box::new(alarm));
        }

        if sets.is_empty() {
            debug!(id, "Empty patch, skipping update");
            return Ok(0);
        }

        params.push(Box::new(id));
        let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let changed = self
            .db
            .execute(&sql, params_refs.as_slice())
            .context("Failed to update task")?;

        debug!(id, changed, "Updated task");
        Ok(changed)
    }

    /// Delete the task matching `id`; no-op when absent
    pub fn delete(&self, id: i64) -> Result<usize> {
        let changed = self
            .db
            .execute("DELETE FROM tasks WHERE id = ?1", rusqlite::params![id])
            .context("Failed to delete task")?;

        debug!(id, changed, "Deleted task");
        Ok(changed)
    }

    /// Fetch a single task by id
    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        let mut stmt = self.db.prepare(
            "SELECT id, title, description, due_date, completed, alarm
             FROM tasks WHERE id = ?1",
        )?;

        let task = stmt
            .query_row(rusqlite::params![id], task_from_row)
            .optional()
            .context("Failed to read task")?;

        Ok(task)
    }

    /// Read every task in primary-key order
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.db.prepare(
            "SELECT id, title, description, due_date, completed, alarm
             FROM tasks ORDER BY id",
        )?;

        let rows = stmt.query_map([], task_from_row)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row.context("Failed to read task row")?);
        }

        Ok(tasks)
    }
}

fn task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        completed: row.get(4)?,
        alarm: row.get(5)?,
    })
}
