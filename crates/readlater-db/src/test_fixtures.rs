//! Test fixtures for repository and backup tests.
//!
//! Provides a store that fails on demand and a builder for populated
//! databases, shared by this crate's integration tests and by the backup
//! crate's tests.
//!
//! ## Usage
//!
//! ```rust
//! use readlater_db::test_fixtures::TestDataBuilder;
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let data = TestDataBuilder::new()
//!     .with_reading("https://a.com", "A")
//!     .with_todo("T")
//!     .with_link(0, 0)
//!     .build()
//!     .await;
//!
//! assert_eq!(data.reading_ids.len(), 1);
//! # });
//! # }
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use readlater_core::{
    Error, ItemId, ItemRepository, KeyValueStore, Namespace, NewReadingItem, NewTodoItem, Result,
    TagRepository,
};

use crate::{Database, MemoryStore};

/// In-memory store whose reads and writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool, what: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(Error::Storage(format!("injected {} failure", what)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, keys: &[&str]) -> Result<Namespace> {
        self.check(&self.fail_reads, "read")?;
        self.inner.get(keys).await
    }

    async fn get_all(&self) -> Result<Namespace> {
        self.check(&self.fail_reads, "read")?;
        self.inner.get_all().await
    }

    async fn set(&self, entries: Namespace) -> Result<()> {
        self.check(&self.fail_writes, "write")?;
        self.inner.set(entries).await
    }

    async fn clear(&self) -> Result<()> {
        self.check(&self.fail_writes, "write")?;
        self.inner.clear().await
    }

    async fn replace_all(&self, entries: Namespace) -> Result<()> {
        self.check(&self.fail_writes, "write")?;
        self.inner.replace_all(entries).await
    }
}

/// Create a Database over a [`FlakyStore`], returning a handle to the store.
pub fn flaky_database() -> (Database, Arc<FlakyStore>) {
    let store = Arc::new(FlakyStore::new());
    let db = Database::from_shared(store.clone());
    (db, store)
}

/// Populated database and the ids of what was created, in creation order.
pub struct TestData {
    pub db: Database,
    pub reading_ids: Vec<ItemId>,
    pub todo_ids: Vec<ItemId>,
}

/// Builder for populated test databases.
#[derive(Default)]
pub struct TestDataBuilder {
    reading: Vec<(String, String, Vec<String>)>,
    todos: Vec<String>,
    links: Vec<(usize, usize)>,
    tags: Vec<String>,
}

impl TestDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reading(mut self, url: &str, title: &str) -> Self {
        self.reading
            .push((url.to_string(), title.to_string(), Vec::new()));
        self
    }

    pub fn with_tagged_reading(mut self, url: &str, title: &str, tags: &[&str]) -> Self {
        self.reading.push((
            url.to_string(),
            title.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        ));
        self
    }

    pub fn with_todo(mut self, title: &str) -> Self {
        self.todos.push(title.to_string());
        self
    }

    /// Link the `todo`-th todo with the `reading`-th reading item (creation order).
    pub fn with_link(mut self, todo: usize, reading: usize) -> Self {
        self.links.push((todo, reading));
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub async fn build(self) -> TestData {
        self.build_in(Database::in_memory()).await
    }

    pub async fn build_in(self, db: Database) -> TestData {
        let mut reading_ids = Vec::new();
        for (url, title, tags) in self.reading {
            let item = db
                .items
                .add_reading_item(NewReadingItem::new(url, title).with_tags(tags))
                .await
                .expect("Failed to create reading item");
            reading_ids.push(item.id);
        }

        let mut todo_ids = Vec::new();
        for title in self.todos {
            let item = db
                .items
                .add_todo_item(NewTodoItem::new(title))
                .await
                .expect("Failed to create todo item");
            todo_ids.push(item.id);
        }

        for (todo, reading) in self.links {
            db.items
                .link_items(todo_ids[todo], reading_ids[reading])
                .await
                .expect("Failed to link items");
        }

        db.tags
            .ensure_initialized()
            .await
            .expect("Failed to initialize tags");
        for tag in self.tags {
            db.tags.add_tag(&tag).await.expect("Failed to add tag");
        }

        TestData {
            db,
            reading_ids,
            todo_ids,
        }
    }
}
