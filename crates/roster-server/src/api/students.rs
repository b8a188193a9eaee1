// ABOUTME: Student CRUD API handlers: create, get by id, list, update, and delete.
// ABOUTME: Decodes and validates input, calls the RecordStore, and maps results to JSON responses.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use roster_core::{NewStudent, Student, StudentInput};
use serde::Serialize;

use crate::app_state::SharedState;
use crate::error::ApiError;

pub const DELETED_MESSAGE: &str = "Student deleted successfully";
pub const UPDATED_MESSAGE: &str = "Student updated successfully";

/// Response body after creating a student.
#[derive(Debug, Serialize)]
pub struct CreateStudentResponse {
    pub id: i64,
}

/// Decode a raw request body into a validated student. The body is parsed
/// here rather than through `Json` so every rejection uses the API error shape.
/// Handlers take `Result<Bytes, BytesRejection>` for the same reason.
fn decode_student(body: &[u8]) -> Result<NewStudent, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::EmptyBody);
    }
    let input: StudentInput = serde_json::from_slice(body)?;
    input.into_new_student().map_err(ApiError::Validation)
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|source| ApiError::InvalidId {
        value: raw.to_string(),
        source,
    })
}

/// POST /api/students - Create a student and return its id.
pub async fn create_student(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("creating a student");
    let student = decode_student(&body?)?;

    let id = state.store.create(student).await?;
    tracing::info!(id, "student created");

    Ok((StatusCode::CREATED, Json(CreateStudentResponse { id })))
}

/// GET /api/students/{id} - Fetch a single student.
pub async fn get_student(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&id)?;
    tracing::info!(id, "getting student");

    let student = state.store.get_by_id(id).await.inspect_err(|e| {
        tracing::error!(id, error = %e, "error getting student");
    })?;
    Ok(Json(student))
}

/// GET /api/students - List every student.
pub async fn list_students(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    tracing::info!("getting all students");

    let students = state.store.list().await.inspect_err(|e| {
        tracing::error!(error = %e, "error listing students");
    })?;
    Ok(Json(students))
}

/// DELETE /api/students/{id} - Delete a student. Reports success whether or
/// not the record existed.
pub async fn delete_student(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let id = parse_id(&id)?;
    tracing::info!(id, "deleting student");

    state.store.delete_by_id(id).await.inspect_err(|e| {
        tracing::error!(id, error = %e, "error deleting student");
    })?;
    Ok(Json(DELETED_MESSAGE))
}

/// PUT /api/students/{id} - Overwrite every field of a student. Reports
/// success whether or not the record existed.
pub async fn update_student(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<&'static str>, ApiError> {
    let id = parse_id(&id)?;
    tracing::info!(id, "updating student");
    let student = decode_student(&body?)?;

    state.store.update_by_id(id, student).await.inspect_err(|e| {
        tracing::error!(id, error = %e, "error updating student");
    })?;
    Ok(Json(UPDATED_MESSAGE))
}
