//! Fixed SQL statements, one set per dialect
//!
//! No statement is ever assembled at runtime. Values are bound as
//! parameters by the store adapters.

/// Postgres statements (`$n` placeholders)
pub mod postgres {
    pub const SELECT_TODOS: &str =
        "SELECT id, title, completed, created_at FROM todos ORDER BY created_at DESC, id DESC LIMIT 100";
    pub const SELECT_TODO: &str =
        "SELECT id, title, completed, created_at FROM todos WHERE id = $1";
    pub const LOCK_TODO: &str =
        "SELECT id, title, completed, created_at FROM todos WHERE id = $1 FOR UPDATE";
    pub const CREATE_TODO: &str =
        "INSERT INTO todos (title) VALUES ($1) RETURNING id, title, completed, created_at";
    pub const UPDATE_TODO: &str = "UPDATE todos SET title = $1, completed = $2 WHERE id = $3";
    pub const DELETE_TODO: &str = "DELETE FROM todos WHERE id = $1";

    pub const SHOW_TABLES: &str = "SELECT schemaname, tablename, tableowner, tablespace, \
         hasindexes, hasrules, hastriggers FROM pg_catalog.pg_tables";
    pub const CREATE_TABLE: &str = "CREATE TABLE todos(\
         id BIGSERIAL NOT NULL, \
         title VARCHAR(225) NOT NULL, \
         completed BOOLEAN NOT NULL DEFAULT FALSE, \
         created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP, \
         PRIMARY KEY(id))";
}

/// MySQL statements (`?` placeholders)
pub mod mysql {
    pub const SELECT_TODOS: &str =
        "SELECT id, title, completed, created_at FROM todos ORDER BY created_at DESC, id DESC LIMIT 100";
    pub const SELECT_TODO: &str = "SELECT id, title, completed, created_at FROM todos WHERE id = ?";
    pub const LOCK_TODO: &str =
        "SELECT id, title, completed, created_at FROM todos WHERE id = ? FOR UPDATE";
    /// No `RETURNING`; the row is read back with [`SELECT_TODO`] on the generated id.
    pub const CREATE_TODO: &str = "INSERT INTO todos (title) VALUES (?)";
    pub const UPDATE_TODO: &str = "UPDATE todos SET title = ?, completed = ? WHERE id = ?";
    pub const DELETE_TODO: &str = "DELETE FROM todos WHERE id = ?";
}

/// Maximum rows returned by a list
pub const LIST_LIMIT: usize = 100;
