// ABOUTME: SQLite-backed RecordStore holding student rows in a single `students` table.
// ABOUTME: Ensures the schema on open and runs each statement on tokio's blocking pool.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use roster_core::{NewStudent, Student};
use rusqlite::{Connection, Row, params};

use crate::store::{RecordStore, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    email TEXT,
    age INTEGER
);";

/// A RecordStore over one SQLite database file. The connection is shared
/// behind a mutex; SQLite itself serializes writers beneath that.
pub struct SqliteStore {
    path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at the given path and ensure the
    /// `students` table exists. Safe to call on every process start.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| unavailable(path, e))?;
            }
        }

        let conn = Connection::open(path).map_err(|e| unavailable(path, e))?;
        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(|e| unavailable(path, e))?;
        tracing::debug!(path = %path.display(), journal_mode = %journal_mode, "sqlite database opened");

        Self::init(conn, path.to_path_buf())
    }

    /// Open a private in-memory database. Its contents vanish on drop.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|e| unavailable(&path, e))?;
        Self::init(conn, path)
    }

    fn init(conn: Connection, path: PathBuf) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(|e| unavailable(&path, e))?;
        tracing::debug!(path = %path.display(), "students table ensured");

        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Returns the path the database was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Worker("sqlite connection lock poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Worker(e.to_string()))?
    }
}

fn unavailable<E>(path: &Path, err: E) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StoreError::StorageUnavailable {
        path: path.to_path_buf(),
        source: Box::new(err),
    }
}

fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
    })
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn create(&self, student: NewStudent) -> Result<i64, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare("INSERT INTO students (name, email, age) VALUES (?1, ?2, ?3)")
                .map_err(StoreError::Write)?;
            stmt.insert(params![student.name, student.email, student.age])
                .map_err(StoreError::Write)
        })
        .await
    }

    async fn get_by_id(&self, id: i64) -> Result<Student, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare("SELECT id, name, email, age FROM students WHERE id = ?1")
                .map_err(StoreError::Read)?;
            match stmt.query_row(params![id], row_to_student) {
                Ok(student) => Ok(student),
                Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound(id)),
                Err(e) => Err(StoreError::Read(e)),
            }
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, name, email, age FROM students ORDER BY id ASC")
                .map_err(StoreError::Read)?;
            let rows = stmt
                .query_map([], row_to_student)
                .map_err(StoreError::Read)?;

            let mut students = Vec::new();
            for row in rows {
                students.push(row.map_err(StoreError::Read)?);
            }
            Ok(students)
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare("DELETE FROM students WHERE id = ?1")
                .map_err(StoreError::Write)?;
            let affected = stmt.execute(params![id]).map_err(StoreError::Write)?;
            tracing::debug!(id, affected, "delete executed");
            Ok(())
        })
        .await
    }

    async fn update_by_id(&self, id: i64, student: NewStudent) -> Result<(), StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare("UPDATE students SET name = ?1, email = ?2, age = ?3 WHERE id = ?4")
                .map_err(StoreError::Write)?;
            let affected = stmt
                .execute(params![student.name, student.email, student.age, id])
                .map_err(StoreError::Write)?;
            tracing::debug!(id, affected, "update executed");
            Ok(())
        })
        .await
    }
}
