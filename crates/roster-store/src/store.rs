// ABOUTME: Defines the RecordStore trait, the five-operation contract handlers depend on.
// ABOUTME: Also defines StoreError, the failure taxonomy shared by every backend.

use std::path::PathBuf;

use async_trait::async_trait;
use roster_core::{NewStudent, Student};
use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("student not found with id {0}")]
    NotFound(i64),

    #[error("query error: {0}")]
    Read(#[source] rusqlite::Error),

    #[error("write error: {0}")]
    Write(#[source] rusqlite::Error),

    #[error("storage worker failed: {0}")]
    Worker(String),
}

/// Durable CRUD over student records. Every method is a single statement
/// against the backing store: no retries, no caching, no batching.
///
/// `delete_by_id` and `update_by_id` succeed when no record has the given
/// id; callers cannot tell "changed" from "absent" by the result alone.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record and return the id assigned to it.
    async fn create(&self, student: NewStudent) -> Result<i64, StoreError>;

    /// Fetch one record, or `StoreError::NotFound`.
    async fn get_by_id(&self, id: i64) -> Result<Student, StoreError>;

    /// Fetch every record in id order. Empty when the table is empty.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    /// Remove the record with the given id, if any.
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    /// Overwrite all mutable fields of the record with the given id, if any.
    async fn update_by_id(&self, id: i64, student: NewStudent) -> Result<(), StoreError>;
}
