// Integration tests for the filesystem baseline store
// Covers save/load, idempotent save, clear semantics and the error kind
// reported for each failing filesystem step

use proptest::prelude::*;
use serde_json::json;
use snapguard_core::errors::SgErrorKind;
use snapguard_core::fingerprint::hash_str;
use snapguard_core::testing::arb_value;
use snapguard_core::Request;
use snapguard_store::{FsStore, SnapshotStore};
use std::fs;
use tempfile::TempDir;

fn setup_test_store() -> (FsStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp store directory");
    let store = FsStore::open(dir.path().join("baselines")).expect("Failed to open store");
    (store, dir)
}

#[test]
fn test_save_then_load_returns_value() {
    // Given: A store and a request identity
    let (store, _dir) = setup_test_store();
    let request = Request::parse("https://x", "/p", "code=123&TEST=save&type=abc");
    let fp = snapguard_core::fingerprint(&request.identity("TEST", ""));

    // When: A value is saved
    let value = json!({"a": 1, "b": "x"});
    store.save(&fp, &value).unwrap();

    // Then: It loads back unchanged
    assert_eq!(store.load(&fp).unwrap(), Some(value));
}

#[test]
fn test_save_is_idempotent() {
    // Given: A saved baseline
    let (store, _dir) = setup_test_store();
    let fp = hash_str("idempotent");
    let value = json!({"k": [1, 2, 3]});
    store.save(&fp, &value).unwrap();
    let first = fs::read(store.path_for(&fp)).unwrap();

    // When: The same value is saved again
    store.save(&fp, &value).unwrap();

    // Then: Content is byte-identical and still a single file
    assert_eq!(fs::read(store.path_for(&fp)).unwrap(), first);
    assert_eq!(store.keys().unwrap(), vec![fp]);
}

#[test]
fn test_save_overwrites_previous_baseline() {
    let (store, _dir) = setup_test_store();
    let fp = hash_str("overwrite");

    store.save(&fp, &json!({"v": 1})).unwrap();
    store.save(&fp, &json!({"v": 2})).unwrap();

    assert_eq!(store.load(&fp).unwrap(), Some(json!({"v": 2})));
}

#[test]
fn test_clear_removes_all_baselines() {
    // Given: Two saved baselines
    let (store, _dir) = setup_test_store();
    let a = hash_str("https://x/a");
    let b = hash_str("https://x/b");
    store.save(&a, &json!(1)).unwrap();
    store.save(&b, &json!(2)).unwrap();

    // When: The store is cleared
    let removed = store.clear().unwrap();

    // Then: Both are gone and the store still works
    assert_eq!(removed, 2);
    assert_eq!(store.load(&a).unwrap(), None);
    assert_eq!(store.load(&b).unwrap(), None);
    assert!(store.keys().unwrap().is_empty());

    store.save(&a, &json!(3)).unwrap();
    assert_eq!(store.load(&a).unwrap(), Some(json!(3)));
}

#[test]
fn test_clear_leaves_subdirectories() {
    // Given: A baseline and a nested directory with a file
    let (store, _dir) = setup_test_store();
    let fp = hash_str("top");
    store.save(&fp, &json!("v")).unwrap();
    let nested = store.root().join("keep");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("inner"), b"x").unwrap();

    // When: Cleared
    let removed = store.clear().unwrap();

    // Then: Only the top-level file went away
    assert_eq!(removed, 1);
    assert!(nested.join("inner").is_file());
}

#[cfg(unix)]
#[test]
fn test_clear_removes_symlinked_baseline() {
    // Given: A baseline that is a symlink to a JSON file outside the store
    let (store, dir) = setup_test_store();
    let outside = dir.path().join("shared.json");
    fs::write(&outside, br#"{"a":1}"#).unwrap();
    let fp = hash_str("linked");
    std::os::unix::fs::symlink(&outside, store.path_for(&fp)).unwrap();
    assert_eq!(store.load(&fp).unwrap(), Some(json!({"a": 1})));

    // When: Cleared
    let removed = store.clear().unwrap();

    // Then: The link is gone, its target is untouched
    assert_eq!(removed, 1);
    assert_eq!(store.load(&fp).unwrap(), None);
    assert!(outside.is_file());
}

#[test]
fn test_clear_on_empty_store() {
    let (store, _dir) = setup_test_store();
    assert_eq!(store.clear().unwrap(), 0);
}

#[test]
fn test_clear_recreates_missing_root() {
    // Given: A store whose directory was deleted
    let (store, _dir) = setup_test_store();
    fs::remove_dir_all(store.root()).unwrap();

    // When: Cleared
    let removed = store.clear().unwrap();

    // Then: Nothing removed, root exists again
    assert_eq!(removed, 0);
    assert!(store.root().is_dir());
}

#[test]
fn test_save_recreates_missing_root() {
    let (store, _dir) = setup_test_store();
    fs::remove_dir_all(store.root()).unwrap();

    let fp = hash_str("late");
    store.save(&fp, &json!(true)).unwrap();

    assert_eq!(store.load(&fp).unwrap(), Some(json!(true)));
}

#[test]
fn test_location_points_at_baseline_file() {
    let (store, _dir) = setup_test_store();
    let fp = hash_str("where");

    let location = store.location(&fp);

    assert_eq!(location, store.root().join(fp.to_hex()));
    assert!(!location.exists());
}

#[test]
fn test_store_is_usable_as_trait_object() {
    let (store, _dir) = setup_test_store();
    let boxed: Box<dyn SnapshotStore> = Box::new(store);
    let fp = hash_str("dyn");

    boxed.save(&fp, &json!({"x": null})).unwrap();

    assert_eq!(boxed.load(&fp).unwrap(), Some(json!({"x": null})));
}

#[test]
fn test_save_under_file_root_is_create_dir_error() {
    // Given: A store whose root path is a regular file
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("not_a_dir");
    fs::write(&root, b"x").unwrap();
    let store = FsStore::new(&root);
    let fp = hash_str("blocked");

    // When: Saving or opening
    let save_err = store.save(&fp, &json!(1)).unwrap_err();
    let open_err = FsStore::open(&root).unwrap_err();

    // Then: Both report the directory step, not a missing value
    assert_eq!(save_err.kind(), SgErrorKind::CreateDir);
    assert_eq!(open_err.kind(), SgErrorKind::CreateDir);
}

#[test]
fn test_load_of_directory_is_read_error() {
    // Given: A directory sitting where the baseline file belongs
    let (store, _dir) = setup_test_store();
    let fp = hash_str("dir-in-the-way");
    fs::create_dir(store.path_for(&fp)).unwrap();

    // When: Loaded
    let err = store.load(&fp).unwrap_err();

    // Then: A read failure, distinct from an absent baseline
    assert_eq!(err.kind(), SgErrorKind::Read);
    assert_eq!(err.fingerprint(), Some(fp.to_hex().as_str()));
}

#[test]
fn test_save_over_directory_is_open_for_write_error() {
    // Given: A directory sitting where the baseline file belongs
    let (store, _dir) = setup_test_store();
    let fp = hash_str("dir-in-the-way");
    let target = store.path_for(&fp);
    fs::create_dir(&target).unwrap();

    // When: Saved
    let err = store.save(&fp, &json!({"v": 1})).unwrap_err();

    // Then: The replace step fails and no scratch file is left behind
    assert_eq!(err.kind(), SgErrorKind::OpenForWrite);
    assert!(target.is_dir());
    assert!(!store.root().join(format!("{}.tmp", fp.to_hex())).exists());
}

#[cfg(unix)]
#[test]
fn test_clear_in_read_only_root_is_delete_error() {
    use std::os::unix::fs::PermissionsExt;

    // Given: Two baselines in a root that forbids unlinking
    let (store, _dir) = setup_test_store();
    let a = hash_str("ro-a");
    let b = hash_str("ro-b");
    store.save(&a, &json!(1)).unwrap();
    store.save(&b, &json!(2)).unwrap();
    fs::set_permissions(store.root(), fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore directory permissions; nothing to observe then
    let canary = store.root().join("canary");
    if fs::write(&canary, b"x").is_ok() {
        fs::remove_file(&canary).unwrap();
        fs::set_permissions(store.root(), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    // When: Cleared
    let result = store.clear();
    fs::set_permissions(store.root(), fs::Permissions::from_mode(0o755)).unwrap();

    // Then: Every deletion was attempted and the failure names one entry
    let err = result.unwrap_err();
    assert_eq!(err.kind(), SgErrorKind::Delete);
    assert!(err.message().contains("(and 1 more failures)"));
    assert!(err.path().unwrap().starts_with(store.root().to_str().unwrap()));
    assert_eq!(store.load(&a).unwrap(), Some(json!(1)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_saved_value_loads_back_equal(value in arb_value()) {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());
        let fp = hash_str(&value.to_string());

        store.save(&fp, &value).unwrap();

        prop_assert_eq!(store.load(&fp).unwrap(), Some(value));
    }
}
