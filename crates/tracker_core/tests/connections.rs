use rusqlite::Connection;
use std::time::Duration;
use tracker_core::db::{open_db, open_db_in_memory, open_db_in_memory_with, open_db_with};
use tracker_core::seed::{populate_seed_data, OWNER_1, OWNER_4, PROJECT_11};
use tracker_core::{
    CommentRepository, DbOptions, ProjectRepository, SqliteCommentRepository,
    SqliteProjectRepository,
};

fn busy_timeout_ms(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn default_options_set_five_second_busy_timeout() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(busy_timeout_ms(&conn), 5_000);
    assert_eq!(DbOptions::default().busy_timeout, Duration::from_secs(5));
}

#[test]
fn open_db_with_applies_busy_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let options = DbOptions {
        busy_timeout: Duration::from_millis(250),
    };

    let conn = open_db_with(dir.path().join("tracker.db"), options).unwrap();
    assert_eq!(busy_timeout_ms(&conn), 250);
}

#[test]
fn open_db_in_memory_with_applies_busy_timeout() {
    let options = DbOptions {
        busy_timeout: Duration::from_millis(1_500),
    };

    let conn = open_db_in_memory_with(options).unwrap();
    assert_eq!(busy_timeout_ms(&conn), 1_500);
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn delete_on_one_connection_sees_and_cascades_comment_from_another() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");
    let mut first = open_db(&path).unwrap();
    populate_seed_data(&mut first).unwrap();
    let mut second = open_db(&path).unwrap();

    let written = {
        let mut comments = SqliteCommentRepository::try_new(&mut second).unwrap();
        comments
            .add_comment(OWNER_4, PROJECT_11, "from the second connection")
            .unwrap()
    };

    let deleted = {
        let mut projects = SqliteProjectRepository::try_new(&mut first).unwrap();
        projects.delete_project(OWNER_1, PROJECT_11).unwrap().unwrap()
    };
    assert_eq!(deleted.comments.len(), 3);
    assert_eq!(deleted.comments[2], written);

    let comments = SqliteCommentRepository::try_new(&mut second).unwrap();
    assert!(comments.list_comments(PROJECT_11).unwrap().is_empty());
    assert!(comments.get_comment(written.comment_id).unwrap().is_none());
    drop(comments);

    let projects = SqliteProjectRepository::try_new(&mut second).unwrap();
    assert!(projects.get_project(OWNER_1, PROJECT_11).unwrap().is_none());
    assert_eq!(projects.project_count().unwrap(), 3);
}
