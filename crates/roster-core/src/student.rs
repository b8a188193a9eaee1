// ABOUTME: Defines the Student record and the request payload used to create or overwrite one.
// ABOUTME: StudentInput is the loosely-typed wire shape; NewStudent is the validated form the store accepts.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validate::{self, FieldError, MAX_AGE, MIN_AGE};

/// Field names in the order validation failures are reported.
const FIELDS: &[&str] = &["name", "email", "age"];

/// A persisted student record. The `id` is assigned by the store on insert
/// and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl Student {
    /// Attach a store-assigned id to a validated payload.
    pub fn from_new(id: i64, new: NewStudent) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            age: new.age,
        }
    }
}

/// The three mutable fields of a student, all present and valid.
/// Used for both create and full-overwrite update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Request body for create and update. Every field is optional here so a
/// missing field is reported as a validation failure on that field rather
/// than as a generic decode error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StudentInput {
    #[serde(default)]
    #[validate(
        required(message = "is required"),
        custom(function = "validate::non_blank")
    )]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "is required"),
        email(message = "is not a valid email address")
    )]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "is required"),
        range(min = MIN_AGE, max = MAX_AGE, message = "must be between 1 and 150")
    )]
    pub age: Option<i64>,
}

impl StudentInput {
    /// Validate every field and return either the complete record or the
    /// full list of failing fields, in declaration order.
    pub fn into_new_student(self) -> Result<NewStudent, Vec<FieldError>> {
        let errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => validate::field_errors(&e, FIELDS),
        };

        match (self.name, self.email, self.age) {
            (Some(name), Some(email), Some(age)) if errors.is_empty() => {
                Ok(NewStudent { name, email, age })
            }
            _ => Err(errors),
        }
    }
}
