//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the tracker core.
//! - Create the tracker schema before a connection is handed out.
//!
//! # Invariants
//! - Connections returned from `open_db*` have `foreign_keys=ON`.
//! - Core code must not read/write application data before the schema exists.
//! - No connection is cached here; callers own every connection they open.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, open_db_in_memory_with, open_db_with};
pub use schema::initialize_schema;

pub type DbResult<T> = Result<T, DbError>;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection bootstrap options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbOptions {
    /// How long SQLite waits on a locked database before failing with `SQLITE_BUSY`.
    pub busy_timeout: Duration,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// DDL for one declared schema object failed.
    Schema {
        object: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Schema { object, source } => {
                write!(f, "failed to create schema object `{object}`: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Schema { source, .. } => Some(source),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
