use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::json;
use session_store::{SessionRecord, SessionStore, SessionUser};
use tempfile::TempDir;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn store_in_tempdir() -> (TempDir, SessionStore) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = SessionStore::new(dir.path().join("session.json"));
    (dir, store)
}

fn rfc3339_from_now(offset: Duration, future: bool) -> String {
    let now = OffsetDateTime::now_utc();
    let instant = if future { now + offset } else { now - offset };
    instant.format(&Rfc3339).expect("format timestamp")
}

fn record_expiring_in(offset: Duration) -> SessionRecord {
    SessionRecord::v1(
        SessionUser::new("u1", "a@b.com").with_name("Ada"),
        "tok",
        rfc3339_from_now(offset, true),
    )
}

fn write_raw(path: &PathBuf, contents: &str) {
    fs::write(path, contents).expect("raw session file should be written");
}

#[test]
fn saved_record_loads_deep_equal() {
    let (_dir, store) = store_in_tempdir();
    let record = record_expiring_in(Duration::from_secs(3600));

    assert!(store.save(&record));
    assert_eq!(store.load(), Some(record));
}

#[test]
fn save_overwrites_prior_record() {
    let (_dir, store) = store_in_tempdir();
    let first = record_expiring_in(Duration::from_secs(3600));
    let second = SessionRecord::v1(
        SessionUser::new("u2", "b@c.com"),
        "tok-2",
        rfc3339_from_now(Duration::from_secs(7200), true),
    );

    assert!(store.save(&first));
    assert!(store.save(&second));
    assert_eq!(store.load(), Some(second));
}

#[test]
fn expired_record_loads_none_and_is_purged() {
    let (_dir, store) = store_in_tempdir();
    let expired = SessionRecord::v1(
        SessionUser::new("u1", "a@b.com"),
        "tok",
        rfc3339_from_now(Duration::from_secs(1), false),
    );

    assert!(store.save(&expired));
    assert!(store.load().is_none());
    assert!(!store.path().exists());

    // Purge is permanent until the next save.
    assert!(store.load().is_none());
}

#[test]
fn malformed_json_loads_none_and_is_purged() {
    let (_dir, store) = store_in_tempdir();
    write_raw(&store.path().to_path_buf(), "{not json");

    assert!(store.load().is_none());
    assert!(!store.path().exists());
}

#[test]
fn record_missing_required_fields_is_purged() {
    let (_dir, store) = store_in_tempdir();
    let raw = json!({
        "version": 1,
        "user": { "email": "a@b.com" },
        "credential": "tok",
        "expires_at": "2099-01-01T00:00:00Z",
    })
    .to_string();
    write_raw(&store.path().to_path_buf(), &raw);

    assert!(store.load().is_none());
    assert!(!store.path().exists());
}

#[test]
fn record_with_empty_user_id_is_purged() {
    let (_dir, store) = store_in_tempdir();
    let raw = json!({
        "version": 1,
        "user": { "id": "", "email": "a@b.com" },
        "credential": "tok",
        "expires_at": "2099-01-01T00:00:00Z",
    })
    .to_string();
    write_raw(&store.path().to_path_buf(), &raw);

    assert!(store.load().is_none());
    assert!(!store.path().exists());
}

#[test]
fn record_with_unsupported_version_is_purged() {
    let (_dir, store) = store_in_tempdir();
    let raw = json!({
        "version": 2,
        "user": { "id": "u1", "email": "a@b.com" },
        "credential": "tok",
        "expires_at": "2099-01-01T00:00:00Z",
    })
    .to_string();
    write_raw(&store.path().to_path_buf(), &raw);

    assert!(store.load().is_none());
    assert!(!store.path().exists());
}

#[test]
fn clear_is_idempotent_and_never_fails() {
    let (_dir, store) = store_in_tempdir();
    let record = record_expiring_in(Duration::from_secs(3600));

    assert!(store.save(&record));
    store.clear();
    assert!(store.load().is_none());

    // A second clear with nothing present is still fine.
    store.clear();
    assert!(store.load().is_none());
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = SessionStore::new(dir.path().join(".taskdeck/session.json"));
    let record = record_expiring_in(Duration::from_secs(3600));

    assert!(store.save(&record));
    assert_eq!(store.load(), Some(record));
}

#[test]
fn failed_save_leaves_prior_record_intact() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    // The target path is a directory, so the rename commit must fail.
    let target = dir.path().join("session.json");
    fs::create_dir(&target).expect("blocking directory should be created");
    let store = SessionStore::new(&target);

    let record = record_expiring_in(Duration::from_secs(3600));
    assert!(!store.save(&record));
}

#[test]
fn credential_may_be_empty_for_cookie_backed_sessions() {
    let (_dir, store) = store_in_tempdir();
    let record = SessionRecord::v1(
        SessionUser::new("u1", "a@b.com"),
        "",
        rfc3339_from_now(Duration::from_secs(3600), true),
    );

    assert!(store.save(&record));
    let loaded = store.load().expect("cookie-backed session should load");
    assert!(loaded.credential.is_empty());
}
