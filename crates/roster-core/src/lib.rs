// ABOUTME: Core library for roster, containing the student record type and payload validation.
// ABOUTME: This crate defines the shared data model used by the store and the HTTP server.

pub mod student;
pub mod validate;

pub use student::{NewStudent, Student, StudentInput};
pub use validate::{FieldError, MAX_AGE, MIN_AGE};
