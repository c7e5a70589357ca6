//! Unit tests for the BookmarkStore public API.
//!
//! These tests exercise the saved-items slot through the
//! `BookmarkStoreTrait` interface, using in-memory and on-disk SQLite databases.

use brewbrowser::database::Database;
use brewbrowser::managers::bookmark_store::{parse_ids, BookmarkStore, BookmarkStoreTrait};
use brewbrowser::types::settings::DEFAULT_SAVED_LIST_KEY;
use rstest::rstest;
use tempfile::TempDir;

/// Helper: create a BookmarkStore backed by a fresh in-memory database.
fn setup() -> BookmarkStore {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    BookmarkStore::new(db.into_shared(), DEFAULT_SAVED_LIST_KEY)
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_empty_store_has_no_ids() {
    let store = setup();
    assert_eq!(store.key(), "beerApp.savedList");
    assert!(store.get_ids().unwrap().is_empty());
    assert_eq!(store.read_raw().unwrap(), None);
}

#[test]
fn test_save_preserves_insertion_order() {
    let store = setup();
    store.save_ids(&ids(&["c", "a", "b"])).unwrap();
    assert_eq!(store.get_ids().unwrap(), vec!["c", "a", "b"]);
}

#[test]
fn test_value_is_stored_as_json_array() {
    let store = setup();
    store.save_ids(&ids(&["b-1", "b-2"])).unwrap();
    assert_eq!(store.read_raw().unwrap().as_deref(), Some(r#"["b-1","b-2"]"#));
}

#[test]
fn test_saving_empty_list_keeps_slot() {
    let store = setup();
    store.save_ids(&ids(&["a"])).unwrap();
    store.save_ids(&[]).unwrap();
    assert_eq!(store.read_raw().unwrap().as_deref(), Some("[]"));
    assert!(store.get_ids().unwrap().is_empty());
}

#[test]
fn test_clear_then_save_starts_fresh() {
    let store = setup();
    store.save_ids(&ids(&["a", "b"])).unwrap();
    store.clear().unwrap();
    store.save_ids(&ids(&["c"])).unwrap();
    assert_eq!(store.get_ids().unwrap(), vec!["c"]);
}

#[test]
fn test_stores_with_different_keys_are_independent() {
    let db = Database::open_in_memory().unwrap().into_shared();
    let first = BookmarkStore::new(db.clone(), "first.savedList");
    let second = BookmarkStore::new(db, "second.savedList");

    first.save_ids(&ids(&["a"])).unwrap();
    second.save_ids(&ids(&["b"])).unwrap();
    first.clear().unwrap();

    assert!(first.get_ids().unwrap().is_empty());
    assert_eq!(second.get_ids().unwrap(), vec!["b"]);
}

#[rstest]
#[case::not_json("not-json")]
#[case::object(r#"{"ids":["a"]}"#)]
#[case::numbers("[1,2]")]
#[case::mixed(r#"["a",2]"#)]
#[case::null("null")]
#[case::empty("")]
fn test_malformed_slot_reads_as_empty(#[case] raw: &str) {
    let store = setup();
    store.write_raw(raw).unwrap();
    assert!(store.get_ids().unwrap().is_empty());
    assert!(parse_ids(raw).is_empty());
}

#[test]
fn test_malformed_slot_is_overwritten_by_next_save() {
    let store = setup();
    store.write_raw("{broken").unwrap();
    store.save_ids(&ids(&["a"])).unwrap();
    assert_eq!(store.get_ids().unwrap(), vec!["a"]);
}

#[test]
fn test_ids_survive_reopen() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let db_path = tmp.path().join("saved.db");

    {
        let db = Database::open(&db_path).unwrap().into_shared();
        let store = BookmarkStore::new(db, DEFAULT_SAVED_LIST_KEY);
        store.save_ids(&ids(&["b-7", "b-3"])).unwrap();
    }

    let db = Database::open(&db_path).unwrap().into_shared();
    let store = BookmarkStore::new(db, DEFAULT_SAVED_LIST_KEY);
    assert_eq!(store.get_ids().unwrap(), vec!["b-7", "b-3"]);
}
