// ABOUTME: In-memory RecordStore used in tests and as a drop-in backend without a database file.
// ABOUTME: Mirrors SQLite AUTOINCREMENT semantics: ids start at 1 and are never reused.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use roster_core::{NewStudent, Student};

use crate::store::{RecordStore, StoreError};

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Student>,
}

/// A RecordStore that keeps every record in a process-local map.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Worker("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, student: NewStudent) -> Result<i64, StoreError> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.rows.insert(id, Student::from_new(id, student));
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> Result<Student, StoreError> {
        self.lock()?
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.lock()?.rows.remove(&id);
        Ok(())
    }

    async fn update_by_id(&self, id: i64, student: NewStudent) -> Result<(), StoreError> {
        if let Some(row) = self.lock()?.rows.get_mut(&id) {
            *row = Student::from_new(id, student);
        }
        Ok(())
    }
}
