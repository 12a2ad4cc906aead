//! Schema registry and idempotent initializer.
//!
//! # Responsibility
//! - Declare the `owners`, `projects`, `comments` tables and the
//!   `v_owner_project_comments` join view.
//! - Create every declared object that is missing, in dependency order.
//!
//! # Invariants
//! - Every statement is `CREATE ... IF NOT EXISTS`; re-running is a no-op.
//! - A failing statement aborts initialization and rolls back the whole batch.
//! - `projects.owner_id` and `comments.project_id` cascade on parent delete.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Kind of schema object declared by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaObjectKind {
    Table,
    View,
}

impl SchemaObjectKind {
    fn as_sqlite_type(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
        }
    }
}

/// One declared schema object and the DDL that creates it.
#[derive(Debug, Clone, Copy)]
pub struct SchemaObject {
    pub name: &'static str,
    pub kind: SchemaObjectKind,
    sql: &'static str,
}

const SCHEMA_OBJECTS: &[SchemaObject] = &[
    SchemaObject {
        name: "owners",
        kind: SchemaObjectKind::Table,
        sql: include_str!("0001_owners.sql"),
    },
    SchemaObject {
        name: "projects",
        kind: SchemaObjectKind::Table,
        sql: include_str!("0002_projects.sql"),
    },
    SchemaObject {
        name: "comments",
        kind: SchemaObjectKind::Table,
        sql: include_str!("0003_comments.sql"),
    },
    SchemaObject {
        name: "v_owner_project_comments",
        kind: SchemaObjectKind::View,
        sql: include_str!("0004_v_owner_project_comments.sql"),
    },
];

/// Returns all declared schema objects in creation order.
pub fn schema_objects() -> &'static [SchemaObject] {
    SCHEMA_OBJECTS
}

/// Creates all missing tables and views on the provided connection.
///
/// Safe to call on every process start.
///
/// # Errors
/// - Returns [`DbError::Schema`] naming the object whose DDL failed.
pub fn initialize_schema(conn: &mut Connection) -> DbResult<()> {
    let started_at = Instant::now();
    let tx = conn.transaction()?;

    for object in SCHEMA_OBJECTS {
        if let Err(err) = tx.execute_batch(object.sql) {
            error!(
                "event=schema_init module=db status=error object={} duration_ms={} error={}",
                object.name,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::Schema {
                object: object.name,
                source: err,
            });
        }
    }
    tx.commit()?;

    info!(
        "event=schema_init module=db status=ok objects={} duration_ms={}",
        SCHEMA_OBJECTS.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

/// Returns whether every declared object exists on this connection.
pub fn is_initialized(conn: &Connection) -> DbResult<bool> {
    Ok(first_missing_object(conn)?.is_none())
}

/// Returns the first declared object missing from this connection, if any.
pub fn first_missing_object(conn: &Connection) -> DbResult<Option<&'static str>> {
    for object in SCHEMA_OBJECTS {
        if !object_exists(conn, object)? {
            return Ok(Some(object.name));
        }
    }
    Ok(None)
}

fn object_exists(conn: &Connection, object: &SchemaObject) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = ?1 AND name = ?2
        );",
        [object.kind.as_sqlite_type(), object.name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{first_missing_object, initialize_schema, is_initialized, schema_objects};
    use rusqlite::Connection;

    #[test]
    fn registry_declares_tables_before_view() {
        let names: Vec<_> = schema_objects().iter().map(|object| object.name).collect();
        assert_eq!(
            names,
            vec!["owners", "projects", "comments", "v_owner_project_comments"]
        );
    }

    #[test]
    fn fresh_connection_reports_first_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!is_initialized(&conn).unwrap());
        assert_eq!(first_missing_object(&conn).unwrap(), Some("owners"));
    }

    #[test]
    fn initialize_twice_is_a_noop() {
        let mut conn = Connection::open_in_memory().unwrap();
        initialize_schema(&mut conn).unwrap();
        initialize_schema(&mut conn).unwrap();
        assert!(is_initialized(&conn).unwrap());
    }
}
