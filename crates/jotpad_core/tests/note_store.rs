use jotpad_core::db::open_db_in_memory;
use jotpad_core::{NewNote, NoteBackend, NotePatch, NoteStore, SqliteNoteStore, StoreError};
use rusqlite::Connection;

#[test]
fn create_assigns_increasing_ids_and_list_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    let late = store.create_record(&NewNote::new("late", 9_000)).unwrap();
    let early = store.create_record(&NewNote::new("early", 1_000)).unwrap();
    assert!(early > late);

    let texts: Vec<String> = store
        .list_records()
        .unwrap()
        .into_iter()
        .map(|note| note.text)
        .collect();
    assert_eq!(texts, vec!["late".to_string(), "early".to_string()]);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    let first = store.create_record(&NewNote::new("a", 1)).unwrap();
    let second = store.create_record(&NewNote::new("b", 2)).unwrap();
    store.delete_record(second).unwrap();
    let third = store.create_record(&NewNote::new("c", 3)).unwrap();

    assert!(third > second);
    assert!(second > first);
}

#[test]
fn update_replaces_only_patched_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let id = store.create_record(&NewNote::new("draft", 100)).unwrap();

    store
        .update_record(
            id,
            &NotePatch {
                text: Some("final".to_string()),
                timestamp: None,
            },
        )
        .unwrap();

    let notes = store.list_records().unwrap();
    assert_eq!(notes[0].text, "final");
    assert_eq!(notes[0].timestamp, 100);
}

#[test]
fn update_missing_record_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    let err = store
        .update_record(42, &NotePatch::replace("ghost", 1))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(42)));
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    let id = store.create_record(&NewNote::new("gone", 1)).unwrap();

    store.delete_record(id).unwrap();
    store.delete_record(id).unwrap();
    store.delete_record(9_999).unwrap();
    assert!(store.list_records().unwrap().is_empty());
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteNoteStore::try_new(&conn).err().expect("should fail");
    assert!(matches!(err, StoreError::MissingRequiredTable("notes")));
}

#[test]
fn try_new_rejects_table_missing_columns() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, note TEXT);")
        .unwrap();
    let err = SqliteNoteStore::try_new(&conn).err().expect("should fail");
    assert!(matches!(
        err,
        StoreError::MissingRequiredColumn {
            table: "notes",
            column: "timestamp"
        }
    ));
}

#[test]
fn failures_of_the_medium_surface_as_db_errors() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE notes;").unwrap();

    assert!(matches!(
        store.create_record(&NewNote::new("x", 1)),
        Err(StoreError::Db(_))
    ));
    assert!(matches!(store.list_records(), Err(StoreError::Db(_))));
}

#[test]
fn unavailable_backend_rejects_every_operation() {
    let store = NoteBackend::connect(Err("unable to open database file".to_string()));
    assert!(!store.is_available());

    assert!(matches!(
        store.create_record(&NewNote::new("lost", 1)),
        Err(StoreError::Unavailable(reason)) if reason == "unable to open database file"
    ));
    assert!(matches!(store.list_records(), Err(StoreError::Unavailable(_))));
    assert!(matches!(
        store.update_record(1, &NotePatch::replace("x", 1)),
        Err(StoreError::Unavailable(_))
    ));
    assert!(matches!(store.delete_record(1), Err(StoreError::Unavailable(_))));
}

#[test]
fn backend_falls_back_when_schema_is_missing() {
    let conn = Connection::open_in_memory().unwrap();
    let store = NoteBackend::connect(Ok(&conn));

    assert!(!store.is_available());
    assert!(matches!(store.list_records(), Err(StoreError::Unavailable(_))));
}

#[test]
fn backend_over_migrated_connection_uses_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let store = NoteBackend::connect(Ok(&conn));
    assert!(store.is_available());

    let id = store.create_record(&NewNote::new("kept", 5)).unwrap();
    let notes = store.list_records().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, id);
}
