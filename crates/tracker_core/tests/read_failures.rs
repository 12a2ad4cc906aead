use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracker_core::db::open_db;
use tracker_core::seed::{populate_seed_data, OWNER_1, PROJECT_11};
use tracker_core::{
    new_id, CommentRepository, OwnerRepository, ProjectRepository, RepoError,
    SqliteCommentRepository, SqliteOwnerRepository, SqliteProjectRepository,
};

static RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static LOGGER_INSTALLED: OnceCell<()> = OnceCell::new();

struct RecordingLogger;

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS
            .lock()
            .unwrap()
            .push(format!("{} {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger;

fn install_logger() {
    LOGGER_INSTALLED.get_or_init(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

fn error_logged_for(event: &str) -> bool {
    let needle = format!("event={event} ");
    RECORDS.lock().unwrap().iter().any(|line| {
        line.starts_with("ERROR")
            && line.contains(&needle)
            && line.contains("status=error")
            && line.contains("error_code=db_error")
    })
}

fn seeded_file(path: &Path) -> Connection {
    let mut conn = open_db(path).unwrap();
    populate_seed_data(&mut conn).unwrap();
    conn
}

fn drop_table_elsewhere(path: &Path, table: &str) {
    let other = Connection::open(path).unwrap();
    other
        .execute_batch(&format!("DROP TABLE {table};"))
        .unwrap();
}

#[test]
fn project_reads_log_and_return_storage_failures() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");
    let mut conn = seeded_file(&path);
    let repo = SqliteProjectRepository::try_new(&mut conn).unwrap();

    drop_table_elsewhere(&path, "comments");
    let err = repo.get_project(OWNER_1, PROJECT_11).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(error_logged_for("project_get"));

    drop_table_elsewhere(&path, "projects");
    let err = repo.project_count().unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(error_logged_for("project_count"));
}

#[test]
fn comment_reads_log_and_return_storage_failures() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");
    let mut conn = seeded_file(&path);
    let repo = SqliteCommentRepository::try_new(&mut conn).unwrap();

    drop_table_elsewhere(&path, "comments");
    let err = repo.list_comments(PROJECT_11).unwrap_err();
    assert_eq!(err.code(), "db_error");
    assert!(error_logged_for("comment_list"));

    let err = repo.get_comment(new_id()).unwrap_err();
    assert_eq!(err.code(), "db_error");
    assert!(error_logged_for("comment_get"));

    let err = repo.list_comments_by_owner(OWNER_1).unwrap_err();
    assert_eq!(err.code(), "db_error");
    assert!(error_logged_for("comment_list_by_owner"));
}

#[test]
fn owner_reads_log_and_return_storage_failures() {
    install_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");
    let conn = seeded_file(&path);
    let repo = SqliteOwnerRepository::try_new(&conn).unwrap();

    drop_table_elsewhere(&path, "owners");
    assert_eq!(repo.get_owner(OWNER_1).unwrap_err().code(), "db_error");
    assert!(error_logged_for("owner_get"));
    assert_eq!(repo.list_owners().unwrap_err().code(), "db_error");
    assert!(error_logged_for("owner_list"));
}
