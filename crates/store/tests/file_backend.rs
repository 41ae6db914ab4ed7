//! Integration tests for the JSON file backend.

use serde::{Deserialize, Serialize};
use store::{Backend, JsonFileBackend, Store};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Journal {
    entries: Vec<String>,
}

impl Default for Journal {
    fn default() -> Self {
        Self {
            entries: vec!["seed".to_string()],
        }
    }
}

#[tokio::test]
async fn missing_file_is_seeded_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.json");

    let store: Store<Journal> = Store::open(JsonFileBackend::new(&path)).await.unwrap();

    assert!(path.exists());
    assert_eq!(store.read(|j| j.entries.clone()).await, vec!["seed"]);
}

#[tokio::test]
async fn mutations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.json");

    {
        let store: Store<Journal> = Store::open(JsonFileBackend::new(&path)).await.unwrap();
        store.update(|j| j.entries.push("first".into())).await;
        store.update(|j| j.entries.push("second".into())).await;
    }

    let reopened: Store<Journal> = Store::open(JsonFileBackend::new(&path)).await.unwrap();
    assert_eq!(
        reopened.read(|j| j.entries.clone()).await,
        vec!["seed", "first", "second"]
    );
}

#[tokio::test]
async fn parent_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("db.json");
    let backend = JsonFileBackend::new(&path);

    backend.persist(b"{\"entries\":[]}").await.unwrap();

    assert_eq!(
        backend.load().await.unwrap().as_deref(),
        Some(&b"{\"entries\":[]}"[..])
    );
}

#[tokio::test]
async fn corrupt_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.json");
    std::fs::write(&path, b"not json").unwrap();

    let result: store::Result<Store<Journal>> = Store::open(JsonFileBackend::new(&path)).await;

    assert!(matches!(result, Err(store::StoreError::Serialization(_))));
}

#[tokio::test]
async fn no_temp_file_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.json");

    let store: Store<Journal> = Store::open(JsonFileBackend::new(&path)).await.unwrap();
    store.update(|j| j.entries.clear()).await;

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["database.json"]);
}
