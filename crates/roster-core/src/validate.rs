// ABOUTME: Field-level validation support for student payloads, on top of the `validator` crate.
// ABOUTME: Converts validator's per-field errors into FieldError values in a caller-chosen order.

use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Youngest accepted age.
pub const MIN_AGE: i64 = 1;
/// Oldest accepted age.
pub const MAX_AGE: i64 = 150;

/// A single failed field, serialized as `{"field": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("field {field} {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, "is required")
    }

    fn from_validation(field: &str, err: &ValidationError) -> Self {
        let message = err.message.as_deref().unwrap_or(&err.code);
        Self::new(field, message)
    }
}

/// Rejects strings that are empty after trimming.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be empty".into()));
    }
    Ok(())
}

/// Flatten `errors` into one FieldError per failure, fields in `order`.
/// Fields not named in `order` are skipped.
pub fn field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    order
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| errs.iter().map(move |e| FieldError::from_validation(field, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(non_blank("Ann").is_ok());
        assert!(non_blank("").is_err());

        let err = non_blank(" \t").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("must not be empty"));
    }

    #[test]
    fn field_errors_follow_the_requested_order() {
        let mut errors = ValidationErrors::new();
        errors.add("age", ValidationError::new("range").with_message("too old".into()));
        errors.add("name", ValidationError::new("required"));

        let fields = field_errors(&errors, &["name", "email", "age"]);

        assert_eq!(
            fields,
            vec![FieldError::new("name", "required"), FieldError::new("age", "too old")]
        );
    }

    #[test]
    fn field_error_display_names_the_field() {
        let err = FieldError::required("email");
        assert_eq!(err.to_string(), "field email is required");
    }
}
