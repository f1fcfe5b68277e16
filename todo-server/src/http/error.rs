//! API error types with IntoResponse
//!
//! Errors become [`Envelope`]s with the matching status. Database errors keep
//! their underlying message behind the same prefix for every dialect.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::DbError;
use crate::envelope::Envelope;

/// Request-level error
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found (404)
    NotFound { message: String },

    /// Database error (500, logged, message passed through)
    Database(DbError),

    /// Request body rejected by the extractor (400/415/422)
    Rejected { status: StatusCode, message: String },

    /// Internal error with a caller-facing message (500)
    Internal { message: String },
}

impl ApiError {
    /// `Todo with id {id} was not found.`
    pub fn todo_not_found(id: &str) -> Self {
        Self::NotFound {
            message: format!("Todo with id {} was not found.", id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = match self {
            Self::NotFound { message } => Envelope::not_found(message),
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error");
                Envelope::internal(format!(
                    "There was an error processing your request: {}",
                    e
                ))
            }
            Self::Rejected { status, message } => {
                tracing::debug!(status = status.as_u16(), reason = %message, "Request rejected");
                Envelope::new(status, message, None)
            }
            Self::Internal { message } => {
                tracing::warn!(reason = %message, "Internal error");
                Envelope::internal(message)
            }
        };

        envelope.into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
