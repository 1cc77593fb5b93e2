//! File-backed credential and snapshot stores against a real directory.

use std::fs;

use catalogue_client::domain::ports::{
    CredentialStore, CredentialStoreError, SnapshotStore, SnapshotStoreError,
};
use catalogue_client::domain::{CredentialSlots, EntityId, Product};
use catalogue_client::outbound::storage::{
    CREDENTIAL_FILE, FileCredentialStore, FileSnapshotStore, PRODUCTS_FILE, StateDir,
};
use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct StateFixture {
    _temp: TempDir,
    root: Utf8PathBuf,
    state: StateDir,
}

#[fixture]
fn state() -> StateFixture {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8Path::from_path(temp.path())
        .expect("utf-8 temp path")
        .join("state");
    let state = StateDir::open_or_create(&root).expect("state dir");
    StateFixture {
        _temp: temp,
        root,
        state,
    }
}

fn slots() -> CredentialSlots {
    CredentialSlots {
        auth_token: Some("abc123".to_owned()),
        auth_token_expiry: Some("2026-03-01T13:00:00+00:00".to_owned()),
    }
}

fn product(id: &str) -> Product {
    Product {
        id: EntityId::new(id).expect("valid id"),
        product_name: format!("Product {id}"),
        url: format!("https://shop.example/products/{id}"),
    }
}

#[rstest]
fn state_dir_is_created_with_parents(state: StateFixture) {
    assert!(state.root.is_dir());
}

#[rstest]
fn credentials_survive_a_new_store_instance(state: StateFixture) {
    FileCredentialStore::new(state.state.clone(), CREDENTIAL_FILE)
        .save(&slots())
        .expect("save");

    let reopened = FileCredentialStore::new(state.state.clone(), CREDENTIAL_FILE);
    assert_eq!(reopened.load().expect("load"), slots());
}

#[rstest]
fn clearing_credentials_removes_both_slots(state: StateFixture) {
    let store = FileCredentialStore::new(state.state.clone(), CREDENTIAL_FILE);
    store.save(&slots()).expect("save");

    store.clear().expect("clear");
    store.clear().expect("second clear");

    assert!(store.load().expect("load").is_empty());
    assert!(!state.root.join(CREDENTIAL_FILE).exists());
}

#[rstest]
fn unreadable_credential_file_is_reported_as_corrupt(state: StateFixture) {
    fs::write(state.root.join(CREDENTIAL_FILE), "{not json").expect("seed file");
    let store = FileCredentialStore::new(state.state.clone(), CREDENTIAL_FILE);

    assert!(matches!(
        store.load(),
        Err(CredentialStoreError::Corrupt { .. })
    ));
}

#[rstest]
fn missing_snapshot_differs_from_empty_snapshot(state: StateFixture) {
    let store: FileSnapshotStore<Product> =
        FileSnapshotStore::new(state.state.clone(), PRODUCTS_FILE);
    assert_eq!(store.load().expect("load"), None);

    store.save(&[]).expect("save empty");
    assert_eq!(store.load().expect("load"), Some(Vec::new()));

    store.clear().expect("clear");
    assert_eq!(store.load().expect("load"), None);
}

#[rstest]
fn snapshot_keeps_order_and_uses_camel_case_fields(state: StateFixture) {
    let store: FileSnapshotStore<Product> =
        FileSnapshotStore::new(state.state.clone(), PRODUCTS_FILE);
    let items = vec![product("2"), product("1")];
    store.save(&items).expect("save");

    assert_eq!(store.load().expect("load"), Some(items));
    let raw = fs::read_to_string(state.root.join(PRODUCTS_FILE)).expect("read raw");
    assert!(raw.contains("\"productName\""));
}

#[rstest]
fn unreadable_snapshot_is_reported_as_corrupt(state: StateFixture) {
    fs::write(state.root.join(PRODUCTS_FILE), "[{\"id\": 1}]").expect("seed file");
    let store: FileSnapshotStore<Product> =
        FileSnapshotStore::new(state.state.clone(), PRODUCTS_FILE);

    assert!(matches!(
        store.load(),
        Err(SnapshotStoreError::Corrupt { .. })
    ));
}
