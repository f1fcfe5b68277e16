//! Uniform JSON response envelope
//!
//! Every response the server produces, success or failure, is an
//! [`Envelope`]:
//!
//! ```json
//! {
//!   "timeStamp": "3/1/2024, 9:30:00 AM",
//!   "statusCode": 200,
//!   "status": "OK",
//!   "message": "Todo retrieved.",
//!   "data": { "todo": { ... } }
//! }
//! ```
//!
//! The envelope owns its [`StatusCode`] and is itself the response, so the
//! body's `statusCode` and the HTTP status line always agree.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Local;
use serde::{Serialize, Serializer};

use crate::models::{TableInfo, Todo, UpdatedTodo};

/// Locale-style timestamp, e.g. `3/1/2024, 9:30:00 AM`
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Response payloads carried in `data`
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Todo { todo: Todo },
    Todos { todos: Vec<Todo> },
    Updated(UpdatedTodo),
    Tables { count: usize, tables: Vec<TableInfo> },
    Table { table: String },
    Welcome(Welcome),
}

/// Static service description served at `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct Welcome {
    pub name: &'static str,
    pub language: &'static str,
    pub framework: &'static str,
    pub message: &'static str,
}

impl Default for Welcome {
    fn default() -> Self {
        Self {
            name: "backend",
            language: "rust",
            framework: "axum",
            message: "hello world!",
        }
    }
}

/// The response wrapper
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    time_stamp: String,
    #[serde(serialize_with = "serialize_status_code")]
    status_code: StatusCode,
    status: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Payload>,
}

impl Envelope {
    pub fn new(status_code: StatusCode, message: impl Into<String>, data: Option<Payload>) -> Self {
        Self {
            time_stamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            status_code,
            status: status_label(status_code),
            message: message.into(),
            data,
        }
    }

    pub fn ok(message: impl Into<String>, data: Payload) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }

    pub fn created(message: impl Into<String>, data: Payload) -> Self {
        Self::new(StatusCode::CREATED, message, Some(data))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, None)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Payload> {
        self.data.as_ref()
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// Upper-cased reason phrase: `NOT FOUND`, `INTERNAL SERVER ERROR`, ...
pub fn status_label(code: StatusCode) -> String {
    code.canonical_reason()
        .map(str::to_uppercase)
        .unwrap_or_else(|| code.as_str().to_owned())
}

fn serialize_status_code<S: Serializer>(code: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(code.as_u16())
}
