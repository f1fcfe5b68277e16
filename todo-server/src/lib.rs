//! todo-server: REST CRUD API for todos
//!
//! One set of handlers served over either a Postgres or a MySQL store,
//! every response wrapped in the same JSON [`Envelope`].

pub mod config;
pub mod db;
pub mod envelope;
pub mod http;
pub mod models;

pub use config::{ConfigError, DbConfig};
pub use db::{Dialect, TodoStore};
pub use envelope::{Envelope, Payload};
pub use http::{build_hello_router, build_router, run_server, AppState, ServerConfig};
pub use models::Todo;
