//! Tag registry behavior: defaults, the protected tag, and self-healing.

use serde_json::json;

use readlater_db::{Database, KeyValueStore, MemoryStore, Namespace, TagRepository};

fn database_with_tags(tags: serde_json::Value) -> (Database, std::sync::Arc<MemoryStore>) {
    let mut ns = Namespace::new();
    ns.insert("allTags".to_string(), tags);
    let store = std::sync::Arc::new(MemoryStore::with_slots(ns));
    (Database::from_shared(store.clone()), store)
}

#[tokio::test]
async fn test_empty_registry_initializes_to_defaults() {
    let db = Database::in_memory();

    let tags = db
        .tags
        .ensure_initialized()
        .await
        .expect("Failed to initialize tags");

    assert_eq!(
        tags,
        vec![
            "Must-read",
            "Priority",
            "Course to check",
            "Interesting Person",
            "Interesting Project",
            "Job to apply",
        ]
    );
    let stored = db.store().get(&["allTags"]).await.unwrap();
    assert_eq!(stored["allTags"], json!(tags));
}

#[tokio::test]
async fn test_protected_tag_cannot_be_removed() {
    let db = Database::in_memory();
    db.tags.ensure_initialized().await.unwrap();

    db.tags.remove_tag("Must-read").await.unwrap();

    let tags = db.tags.list_tags().await.unwrap();
    assert_eq!(tags[0], "Must-read");
}

#[tokio::test]
async fn test_missing_protected_tag_is_healed_at_front() {
    let (db, store) = database_with_tags(json!(["Work", "Priority"]));

    let tags = db.tags.ensure_initialized().await.unwrap();

    assert_eq!(tags, vec!["Must-read", "Work", "Priority"]);
    let stored = store.get(&["allTags"]).await.unwrap();
    assert_eq!(stored["allTags"], json!(["Must-read", "Work", "Priority"]));
}

#[tokio::test]
async fn test_list_tags_never_writes() {
    let (db, store) = database_with_tags(json!(["Work"]));

    let tags = db.tags.list_tags().await.unwrap();

    assert_eq!(tags, vec!["Must-read", "Work"]);
    let stored = store.get(&["allTags"]).await.unwrap();
    assert_eq!(stored["allTags"], json!(["Work"]));
}

#[tokio::test]
async fn test_list_tags_on_empty_store_returns_defaults_without_writing() {
    let db = Database::in_memory();

    let tags = db.tags.list_tags().await.unwrap();

    assert_eq!(tags.len(), 6);
    assert!(db.store().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_tag_appends_once() {
    let db = Database::in_memory();
    db.tags.ensure_initialized().await.unwrap();

    db.tags.add_tag("Podcast").await.unwrap();
    db.tags.add_tag("Podcast").await.unwrap();

    let tags = db.tags.list_tags().await.unwrap();
    assert_eq!(tags.iter().filter(|t| *t == "Podcast").count(), 1);
    assert_eq!(tags.last().map(String::as_str), Some("Podcast"));
}

#[tokio::test]
async fn test_add_tag_is_case_sensitive() {
    let db = Database::in_memory();
    db.tags.ensure_initialized().await.unwrap();

    db.tags.add_tag("priority").await.unwrap();

    let tags = db.tags.list_tags().await.unwrap();
    assert!(tags.contains(&"Priority".to_string()));
    assert!(tags.contains(&"priority".to_string()));
}

#[tokio::test]
async fn test_add_blank_tag_is_rejected() {
    let db = Database::in_memory();

    let err = db.tags.add_tag("   ").await.unwrap_err();

    assert!(matches!(err, readlater_db::Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_remove_tag_persists_and_ignores_unknown_names() {
    let db = Database::in_memory();
    db.tags.ensure_initialized().await.unwrap();

    db.tags.remove_tag("Job to apply").await.unwrap();
    db.tags.remove_tag("Never existed").await.unwrap();

    let tags = db.tags.list_tags().await.unwrap();
    assert_eq!(tags.len(), 5);
    assert!(!tags.contains(&"Job to apply".to_string()));
}

#[tokio::test]
async fn test_add_on_unhealed_registry_persists_healed_list() {
    let (db, store) = database_with_tags(json!(["Work"]));

    db.tags.add_tag("Home").await.unwrap();

    let stored = store.get(&["allTags"]).await.unwrap();
    assert_eq!(stored["allTags"], json!(["Must-read", "Work", "Home"]));
}
