//! SQLite persistence for users and monthly results.
//!
//! One connection guarded by a mutex. Writes are single statements, so the uniqueness
//! constraint on `(user_id, category, period)` resolves concurrent submissions: the last
//! committed upsert wins and no duplicate row is created.

mod results;
mod users;

use std::sync::{Mutex, MutexGuard};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rusqlite::Connection;
use tracing::{error, info};

use crate::error::error_response;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS results (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id),
    category TEXT NOT NULL,
    value REAL NOT NULL,
    inputs TEXT NOT NULL,
    period TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (user_id, category, period)
);
";

/// Error enumeration for persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Self::Conflict
            }
            other => Self::Sqlite(other),
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        error!(error = %self, "store operation failed");
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            self.to_string(),
        )
    }
}

/// SQLite-backed implementation of the user and result repositories.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and applies the schema. `:memory:` opens a
    /// private in-memory database.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        let store = Self::from_connection(conn)?;
        info!(path, "result store ready");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection mutex poisoned".to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("malformed {column}: '{raw}'")]
struct MalformedColumn {
    column: &'static str,
    raw: String,
}

/// Text column that does not parse into its domain type.
fn malformed(index: usize, column: &'static str, raw: impl Into<String>) -> rusqlite::Error {
    conversion_error(
        index,
        MalformedColumn {
            column,
            raw: raw.into(),
        },
    )
}

/// Maps a column parse failure into the error type rusqlite row closures return.
fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}
