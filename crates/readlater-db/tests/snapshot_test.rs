//! Whole-namespace export and import.

use serde_json::json;
use tempfile::TempDir;

use readlater_db::test_fixtures::TestDataBuilder;
use readlater_db::{
    Credentials, Database, Error, ItemRepository, KeyValueStore, SettingsRepository,
    TagRepository,
};

#[tokio::test]
async fn test_export_import_round_trip() {
    let source = TestDataBuilder::new()
        .with_tagged_reading("https://a.com", "A", &["Priority"])
        .with_reading("https://b.com", "B")
        .with_todo("T")
        .with_link(0, 1)
        .with_tag("Podcast")
        .build()
        .await;
    source
        .db
        .settings
        .save_credentials(&Credentials::new("123:abc", "-100"))
        .await
        .unwrap();

    let content = source.db.snapshots.export_snapshot().await.unwrap();

    let target = Database::in_memory();
    let summary = target.snapshots.import_snapshot(&content).await.unwrap();

    assert_eq!(summary.reading_count, 2);
    assert_eq!(summary.todo_count, 1);
    assert_eq!(
        target.items.load_all().await.unwrap(),
        source.db.items.load_all().await.unwrap()
    );
    assert_eq!(
        target.tags.list_tags().await.unwrap(),
        source.db.tags.list_tags().await.unwrap()
    );
    assert_eq!(
        target.settings.load_credentials().await.unwrap(),
        Some(Credentials::new("123:abc", "-100"))
    );
}

#[tokio::test]
async fn test_invalid_content_leaves_namespace_untouched() {
    let data = TestDataBuilder::new()
        .with_reading("https://a.com", "A")
        .build()
        .await;
    let before = data.db.store().get_all().await.unwrap();

    for content in ["not json", "[1, 2]", r#"{"allTags": []}"#, r#"{"todoList": 5}"#] {
        let err = data.db.snapshots.import_snapshot(content).await.unwrap_err();
        assert!(
            matches!(err, Error::InvalidBackup(_)),
            "unexpected error for {:?}: {}",
            content,
            err
        );
    }

    assert_eq!(data.db.store().get_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_import_replaces_whole_namespace() {
    let data = TestDataBuilder::new()
        .with_reading("https://a.com", "A")
        .with_todo("T")
        .build()
        .await;
    data.db
        .settings
        .save_credentials(&Credentials::new("123:abc", "-100"))
        .await
        .unwrap();

    let snapshot = json!({ "todoList": [] }).to_string();
    data.db.snapshots.import_snapshot(&snapshot).await.unwrap();

    let ns = data.db.store().get_all().await.unwrap();
    assert_eq!(ns.len(), 1);
    assert!(data.db.items.load_all().await.unwrap().reading_list.is_empty());
    assert!(data.db.settings.load_credentials().await.unwrap().is_none());
}

#[tokio::test]
async fn test_import_keeps_unknown_fields_and_slots() {
    let db = Database::in_memory();
    let snapshot = json!({
        "readingList": [{
            "id": "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b",
            "url": "https://a.com",
            "title": "A",
            "tags": [],
            "status": "unread",
            "linkedTodoIds": [],
            "createdAt": 1700000000000i64,
            "readingTime": 7
        }],
        "themePreference": "dark"
    })
    .to_string();

    db.snapshots.import_snapshot(&snapshot).await.unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&db.snapshots.export_snapshot().await.unwrap()).unwrap();

    assert_eq!(exported["themePreference"], "dark");
    assert_eq!(exported["readingList"][0]["readingTime"], 7);
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("readlater.json");

    let db = Database::open(&path).await.unwrap();
    let data = TestDataBuilder::new()
        .with_reading("https://a.com", "A")
        .with_todo("T")
        .with_link(0, 0)
        .build_in(db)
        .await;
    let content = data.db.snapshots.export_snapshot().await.unwrap();

    let reopened = Database::open(&path).await.unwrap();
    assert_eq!(reopened.snapshots.export_snapshot().await.unwrap(), content);
    assert!(reopened.items.load_all().await.unwrap().links_are_symmetric());
}

#[tokio::test]
async fn test_storage_failure_propagates() {
    let (db, store) = readlater_db::test_fixtures::flaky_database();
    db.tags.ensure_initialized().await.unwrap();

    store.fail_writes(true);
    let err = db.tags.add_tag("Podcast").await.unwrap_err();
    assert!(matches!(err, Error::Storage(_)));

    store.fail_writes(false);
    store.fail_reads(true);
    let err = db.snapshots.export_snapshot().await.unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
}
