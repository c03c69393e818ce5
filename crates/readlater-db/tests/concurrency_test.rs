//! Concurrent mutations through one Database must not lose updates.

use futures::future::join_all;
use tempfile::TempDir;

use readlater_db::test_fixtures::TestDataBuilder;
use readlater_db::{Database, ItemRepository, NewReadingItem, NewTodoItem, TagRepository};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_lose_nothing() {
    let db = Database::in_memory();

    let reading = (0..25).map(|i| {
        let db = db.clone();
        async move {
            db.items
                .add_reading_item(NewReadingItem::new(format!("https://{}.com", i), "R"))
                .await
        }
    });
    let todos = (0..25).map(|i| {
        let db = db.clone();
        async move { db.items.add_todo_item(NewTodoItem::new(format!("T{}", i))).await }
    });

    let (reading, todos) = tokio::join!(join_all(reading), join_all(todos));
    assert!(reading.iter().all(Result::is_ok));
    assert!(todos.iter().all(Result::is_ok));

    let lists = db.items.load_all().await.unwrap();
    assert_eq!(lists.reading_list.len(), 25);
    assert_eq!(lists.todo_list.len(), 25);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_links_and_tag_edits_on_file_store() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("readlater.json")).await.unwrap();
    let data = TestDataBuilder::new()
        .with_reading("https://a.com", "A")
        .with_reading("https://b.com", "B")
        .with_todo("T1")
        .with_todo("T2")
        .build_in(db)
        .await;

    let mut tasks = Vec::new();
    for &todo_id in &data.todo_ids {
        for &reading_id in &data.reading_ids {
            let db = data.db.clone();
            tasks.push(tokio::spawn(async move {
                db.items.link_items(todo_id, reading_id).await
            }));
        }
    }
    for i in 0..8 {
        let db = data.db.clone();
        tasks.push(tokio::spawn(async move {
            db.tags.add_tag(&format!("tag-{}", i)).await
        }));
    }

    for result in join_all(tasks).await {
        result.expect("task panicked").expect("operation failed");
    }

    let lists = data.db.items.load_all().await.unwrap();
    assert!(lists.links_are_symmetric());
    for todo in &lists.todo_list {
        assert_eq!(todo.linked_reading_ids.len(), 2);
    }
    let tags = data.db.tags.list_tags().await.unwrap();
    assert_eq!(tags.iter().filter(|t| t.starts_with("tag-")).count(), 8);
}
