use bulkrow_core::{
    open_db, BulkRecordWriter, DbConfig, RecordReader, RecordService, RepoError,
    SqliteRecordRepository, User, WriteMode,
};
use rusqlite::Connection;

fn fresh_conn() -> Connection {
    open_db(&DbConfig::in_memory()).unwrap()
}

fn forbid_duplicate_names(conn: &Connection) {
    let repo = SqliteRecordRepository::new(conn);
    repo.ensure_table::<User>().unwrap();
    conn.execute_batch("CREATE UNIQUE INDEX users_name_unique ON users (name);")
        .unwrap();
}

#[test]
fn transactional_write_then_read_roundtrip() {
    let conn = fresh_conn();
    let repo = SqliteRecordRepository::new(&conn);

    let input = vec![User::new("Rob Pike"), User::new("Ken Thompson")];
    let written = repo.insert_all_tx(&input).unwrap();
    assert_eq!(written, 2);

    let stored: Vec<User> = repo.list_all().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, Some(1));
    assert_eq!(stored[0].name, "Rob Pike");
    assert_eq!(stored[1].id, Some(2));
    assert_eq!(stored[1].name, "Ken Thompson");
}

#[test]
fn transactional_write_rolls_back_on_invalid_record() {
    let conn = fresh_conn();
    let repo = SqliteRecordRepository::new(&conn);

    let input = vec![User::new("valid"), User::new("   ")];
    let err = repo.insert_all_tx(&input).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let stored: Vec<User> = repo.list_all().unwrap();
    assert!(stored.is_empty());
}

#[test]
fn transactional_write_rolls_back_on_statement_failure() {
    let conn = fresh_conn();
    forbid_duplicate_names(&conn);
    let repo = SqliteRecordRepository::new(&conn);

    let input = vec![User::new("dup"), User::new("dup")];
    let err = repo.insert_all_tx(&input).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let stored: Vec<User> = repo.list_all().unwrap();
    assert!(stored.is_empty());
}

#[test]
fn per_row_mode_keeps_rows_inserted_before_the_failure() {
    let conn = fresh_conn();
    forbid_duplicate_names(&conn);
    let repo = SqliteRecordRepository::new(&conn);

    let input = vec![User::new("first"), User::new("first"), User::new("never")];
    let err = repo.insert_each(&input).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let stored: Vec<User> = repo.list_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "first");
}

#[test]
fn batched_write_preserves_input_order() {
    let conn = fresh_conn();
    let repo = SqliteRecordRepository::new(&conn);

    let input = vec![User::new("a"), User::new("b")];
    repo.insert_all_batched(&input).unwrap();

    let stored: Vec<User> = repo.list_all().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, "a");
    assert_eq!(stored[1].name, "b");
    assert!(stored[0].id.unwrap() < stored[1].id.unwrap());
}

#[test]
fn batched_write_rolls_back_as_one_unit() {
    let conn = fresh_conn();
    forbid_duplicate_names(&conn);
    let repo = SqliteRecordRepository::new(&conn);

    let input = vec![User::new("dup"), User::new("dup")];
    let err = repo.insert_all_batched(&input).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let stored: Vec<User> = repo.list_all().unwrap();
    assert!(stored.is_empty());
}

#[test]
fn batched_write_of_nothing_is_a_successful_noop() {
    let conn = fresh_conn();
    let repo = SqliteRecordRepository::new(&conn);

    let input: Vec<User> = Vec::new();
    let written = repo.insert_all_batched(&input).unwrap();
    assert_eq!(written, 0);

    let stored: Vec<User> = repo.list_all().unwrap();
    assert!(stored.is_empty());
}

#[test]
fn caller_supplied_identity_is_ignored_on_insert() {
    let conn = fresh_conn();
    let repo = SqliteRecordRepository::new(&conn);

    let mut user = User::new("pre-labeled");
    user.id = Some(99);
    repo.insert_all_tx(std::slice::from_ref(&user)).unwrap();

    let stored: Vec<User> = repo.list_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, Some(1));
}

#[test]
fn ensure_table_is_idempotent() {
    let conn = fresh_conn();
    let repo = SqliteRecordRepository::new(&conn);

    repo.ensure_table::<User>().unwrap();
    repo.ensure_table::<User>().unwrap();

    repo.insert_all_tx(&[User::new("still works")]).unwrap();
    let stored: Vec<User> = repo.list_all().unwrap();
    assert_eq!(stored.len(), 1);
}

#[test]
fn service_dispatches_each_named_mode() {
    for mode in [WriteMode::PerRow, WriteMode::Transaction, WriteMode::Batch] {
        let conn = fresh_conn();
        let service = RecordService::new(SqliteRecordRepository::new(&conn));

        let input = vec![User::new("Rob Pike"), User::new("Ken Thompson")];
        let written = service.write_all(&input, mode).unwrap();
        assert_eq!(written, 2);

        let stored = service.read_all::<User>().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, Some(1));
        assert_eq!(stored[0].name, "Rob Pike");
        assert_eq!(stored[1].id, Some(2));
        assert_eq!(stored[1].name, "Ken Thompson");
    }
}

#[test]
fn file_backed_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::file(dir.path().join("records.db"));

    {
        let conn = open_db(&config).unwrap();
        let repo = SqliteRecordRepository::new(&conn);
        repo.insert_all_batched(&[User::new("durable")]).unwrap();
    }

    let conn = open_db(&config).unwrap();
    let repo = SqliteRecordRepository::new(&conn);
    let stored: Vec<User> = repo.list_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "durable");
}
