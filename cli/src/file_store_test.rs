use super::*;
use session::{Session, TOKEN_TTL};

fn store_in(dir: &tempfile::TempDir) -> FileTokenStore {
    FileTokenStore::new(dir.path().join("session.json"))
}

#[test]
fn missing_file_reads_as_logged_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = Session::new(store_in(&dir));
    assert!(!session.is_logged_in());
    assert_eq!(session.token(), None);
}

#[test]
fn saved_token_round_trips_with_seven_day_expiry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    let session = Session::new(store.clone());

    session.set_token("abc123").expect("save");

    assert_eq!(session.token().as_deref(), Some("abc123"));
    let expires_at = store.expires_at().expect("record present");
    let remaining = expires_at - unix_now();
    assert!(remaining <= TOKEN_TTL.as_secs());
    assert!(remaining >= TOKEN_TTL.as_secs() - 60);

    let raw = fs::read_to_string(store.path()).expect("read");
    let record: CookieRecord = serde_json::from_str(&raw).expect("json");
    assert_eq!(record.name, TOKEN_KEY);
}

#[test]
fn second_save_replaces_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = Session::new(store_in(&dir));
    session.set_token("first").expect("save");
    session.set_token("second").expect("save");
    assert_eq!(session.token().as_deref(), Some("second"));
}

#[test]
fn expired_record_reads_as_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    let record = CookieRecord {
        name: TOKEN_KEY.to_owned(),
        value: "old".to_owned(),
        expires_at: unix_now() - 1,
    };
    fs::write(store.path(), serde_json::to_vec(&record).expect("encode")).expect("write");

    assert_eq!(store.load(), None);
    assert!(!Session::new(store).is_logged_in());
}

#[test]
fn foreign_or_corrupt_file_reads_as_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    fs::write(store.path(), "not json").expect("write");
    assert_eq!(store.load(), None);

    let record = CookieRecord {
        name: "other".to_owned(),
        value: "x".to_owned(),
        expires_at: unix_now() + 100,
    };
    fs::write(store.path(), serde_json::to_vec(&record).expect("encode")).expect("write");
    assert_eq!(store.load(), None);
}

#[test]
fn log_out_is_idempotent_and_tolerates_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    let session = Session::new(store.clone());

    session.log_out().expect("clear without file");
    session.set_token("abc").expect("save");
    session.log_out().expect("first clear");
    session.log_out().expect("second clear");

    assert!(!session.is_logged_in());
    assert!(!store.path().exists());
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("nested/deeper/session.json"));
    store.save("tok", TOKEN_TTL).expect("save");
    assert_eq!(store.load().as_deref(), Some("tok"));
}
