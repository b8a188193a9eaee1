// ABOUTME: Persistence layer for roster, the sole owner of student storage.
// ABOUTME: Provides the RecordStore trait plus SQLite and in-memory implementations.

pub mod memory;
pub mod sqlite;
pub mod store;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{RecordStore, StoreError};
