// ABOUTME: API module containing the HTTP handler functions for the roster REST API.
// ABOUTME: Student CRUD lives in the students sub-module.

pub mod students;
