//! Repository layer: the tracker's data-access core.
//!
//! # Responsibility
//! - Own every write to `owners`, `projects` and `comments`.
//! - Assemble nested project views from the relational rows.
//! - Map SQLite failures into semantic errors (`ConstraintViolation`,
//!   `NotFound`) distinct from transport errors (`Db`).
//!
//! # Invariants
//! - Every mutating call runs in exactly one transaction; a failing call
//!   leaves no partial rows behind.
//! - Repositories only accept connections with the schema created and
//!   `foreign_keys=ON`, so cascade deletes are always in force.
//! - "No rows" on a read is `Ok(None)` / an empty `Vec`, never an error.

use crate::db::schema::first_missing_object;
use crate::db::DbError;
use crate::model::comment::Comment;
use crate::model::owner::{Owner, OwnerId};
use log::{error, warn};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod comment_repo;
pub mod owner_repo;
pub mod project_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from tracker repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// A write referenced a missing owner/project or broke a uniqueness rule.
    /// The enclosing transaction has been rolled back.
    ConstraintViolation(String),
    /// An update targeted a row that does not exist.
    NotFound { entity: &'static str, id: Uuid },
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
    /// Connection has not been initialized with the tracker schema.
    MissingRequiredTable(&'static str),
    /// Connection has `foreign_keys=OFF`; cascades would silently not run.
    ForeignKeysDisabled,
}

impl RepoError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::NotFound { .. } => "not_found",
            Self::Db(_) => "db_error",
            Self::InvalidData(_) => "invalid_data",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::ForeignKeysDisabled => "foreign_keys_disabled",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "tracker repository requires schema object `{table}`")
            }
            Self::ForeignKeysDisabled => {
                write!(f, "tracker repository requires `PRAGMA foreign_keys = ON`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, message) = &value {
            if err.code == ErrorCode::ConstraintViolation {
                return Self::ConstraintViolation(
                    message.clone().unwrap_or_else(|| err.to_string()),
                );
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies the connection is usable by tracker repositories.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if let Some(missing) = first_missing_object(conn)? {
        return Err(RepoError::MissingRequiredTable(missing));
    }

    let foreign_keys: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if foreign_keys != 1 {
        return Err(RepoError::ForeignKeysDisabled);
    }

    Ok(())
}

/// Logs a failed repository call at a level matching its error kind.
pub(crate) fn log_failure(event: &str, err: &RepoError) {
    match err {
        RepoError::ConstraintViolation(_) | RepoError::NotFound { .. } => warn!(
            "event={event} module=repo status=error error_code={}",
            err.code()
        ),
        _ => error!(
            "event={event} module=repo status=error error_code={} error={err}",
            err.code()
        ),
    }
}

/// Passes `result` through, logging it first when it is an error.
pub(crate) fn logged<T>(event: &str, result: RepoResult<T>) -> RepoResult<T> {
    if let Err(err) = &result {
        log_failure(event, err);
    }
    result
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn fetch_owner(conn: &Connection, owner_id: OwnerId) -> RepoResult<Option<Owner>> {
    let row = conn
        .query_row(
            "SELECT owner_id, owner_username FROM owners WHERE owner_id = ?1;",
            [owner_id.to_string()],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    match row {
        Some((id_text, username)) => Ok(Some(Owner {
            owner_id: parse_uuid(&id_text, "owners.owner_id")?,
            username,
        })),
        None => Ok(None),
    }
}

pub(crate) const COMMENT_COLUMNS: &str = "comment_id, commenter_id, commenter_username, project_id, message";

/// Loads all comments of one project in insertion order.
pub(crate) fn fetch_comments_for_project(
    conn: &Connection,
    project_id: Uuid,
) -> RepoResult<Vec<Comment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMMENT_COLUMNS}
         FROM comments
         WHERE project_id = ?1
         ORDER BY rowid ASC;"
    ))?;
    let mut rows = stmt.query([project_id.to_string()])?;
    let mut comments = Vec::new();
    while let Some(row) = rows.next()? {
        comments.push(parse_comment_row(row)?);
    }
    Ok(comments)
}

pub(crate) fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let comment_id: String = row.get("comment_id")?;
    let commenter_id: String = row.get("commenter_id")?;
    let project_id: String = row.get("project_id")?;

    Ok(Comment {
        comment_id: parse_uuid(&comment_id, "comments.comment_id")?,
        commenter_id: parse_uuid(&commenter_id, "comments.commenter_id")?,
        commenter_username: row.get("commenter_username")?,
        project_id: parse_uuid(&project_id, "comments.project_id")?,
        message: row.get("message")?,
    })
}

#[cfg(test)]
mod tests {
    use super::RepoError;
    use rusqlite::Connection;

    #[test]
    fn foreign_key_failures_map_to_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id TEXT PRIMARY KEY);
             CREATE TABLE child (id TEXT PRIMARY KEY, parent_id TEXT REFERENCES parent(id));",
        )
        .unwrap();

        let err: RepoError = conn
            .execute("INSERT INTO child (id, parent_id) VALUES ('c', 'missing');", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));
        assert_eq!(err.code(), "constraint_violation");
    }

    #[test]
    fn other_sqlite_failures_stay_db_errors() {
        let conn = Connection::open_in_memory().unwrap();
        let err: RepoError = conn
            .execute("INSERT INTO nowhere (id) VALUES (1);", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, RepoError::Db(_)));
    }
}
