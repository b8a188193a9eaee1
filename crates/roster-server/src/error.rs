// ABOUTME: Error type returned by API handlers and its mapping to HTTP responses.
// ABOUTME: Every failure renders as {"status": "Error", "error": <message or field list>}.

use std::num::ParseIntError;

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::FieldError;
use roster_store::StoreError;
use serde::Serialize;
use thiserror::Error;

const STATUS_ERROR: &str = "Error";

/// Errors a handler can surface to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body could not be buffered, for example because it exceeds the
    /// request body limit.
    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),

    #[error("empty body")]
    EmptyBody,

    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("{} field(s) failed validation", .0.len())]
    Validation(Vec<FieldError>),

    #[error("invalid id {value:?}: {source}")]
    InvalidId {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Body(rejection) => rejection.status(),
            ApiError::EmptyBody
            | ApiError::MalformedBody(_)
            | ApiError::Validation(_)
            | ApiError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The `error` member: a plain message, or one entry per failing field.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: ErrorDetail,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            error: ErrorDetail::Message(message.into()),
        }
    }

    pub fn fields(fields: Vec<FieldError>) -> Self {
        Self {
            status: STATUS_ERROR,
            error: ErrorDetail::Fields(fields),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        // Store messages are returned verbatim, including driver detail.
        let body = match self {
            ApiError::Validation(fields) => ErrorBody::fields(fields),
            other => ErrorBody::message(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
