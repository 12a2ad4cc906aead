use tracker_core::db::open_db_in_memory;
use tracker_core::seed::{populate_seed_data, seed_owner, OWNER_1, OWNER_4, SEED_COMMENTS};
use tracker_core::{Owner, OwnerRepository, RepoError, SqliteOwnerRepository};

#[test]
fn populate_seed_data_is_repeatable() {
    let mut conn = open_db_in_memory().unwrap();

    let first = populate_seed_data(&mut conn).unwrap();
    let second = populate_seed_data(&mut conn).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.owners, 4);
    assert_eq!(first.projects, 4);
    assert_eq!(first.comments, SEED_COMMENTS.len());

    let comments: i64 = conn
        .query_row("SELECT COUNT(*) FROM comments;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(comments, 4);
}

#[test]
fn seeded_owners_are_readable() {
    let mut conn = open_db_in_memory().unwrap();
    populate_seed_data(&mut conn).unwrap();
    let repo = SqliteOwnerRepository::try_new(&conn).unwrap();

    let owner = repo.get_owner(OWNER_1).unwrap().unwrap();
    assert_eq!(owner.username, "challengeuser1");
    assert_eq!(repo.list_owners().unwrap()[3].owner_id, OWNER_4);
    assert!(repo.get_owner(tracker_core::new_id()).unwrap().is_none());
}

#[test]
fn seed_owner_rejects_duplicate_id() {
    let conn = open_db_in_memory().unwrap();
    let owner = Owner::new(OWNER_1, "first");

    seed_owner(&conn, &owner).unwrap();
    let err = seed_owner(&conn, &Owner::new(OWNER_1, "again")).unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
}

#[test]
fn empty_owner_table_lists_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteOwnerRepository::try_new(&conn).unwrap();
    assert!(repo.list_owners().unwrap().is_empty());
}
