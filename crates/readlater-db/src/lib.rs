//! # readlater-db
//!
//! Key-value storage layer for ReadLater.
//!
//! This crate provides:
//! - Key-value store adapters (in-memory and single JSON file)
//! - Repository implementations for reading/todo items, tags, and credentials
//! - Snapshot export/import of the whole namespace
//!
//! ## Example
//!
//! ```rust,no_run
//! use readlater_db::{Database, ItemRepository, NewReadingItem, NewTodoItem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::open("readlater.json").await?;
//!
//!     let reading = db.items.add_reading_item(NewReadingItem::new("https://a.com", "A")).await?;
//!     let todo = db.items.add_todo_item(NewTodoItem::new("T")).await?;
//!     db.items.link_items(todo.id, reading.id).await?;
//!
//!     println!("Linked {} to {}", reading.id, todo.id);
//!     Ok(())
//! }
//! ```
pub mod file_store;
pub mod items;
pub mod memory_store;
mod slots;
pub mod settings;
pub mod snapshot;
pub mod tags;

// Test fixtures for integration tests
pub mod test_fixtures;

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

// Re-export core types
pub use readlater_core::*;

pub use file_store::JsonFileStore;
pub use items::KvItemRepository;
pub use memory_store::MemoryStore;
pub use settings::KvSettingsRepository;
pub use snapshot::{parse_snapshot, ImportSummary, SnapshotRepository};
pub use tags::{heal_tags, KvTagRepository};

/// Guard serializing read-modify-write cycles against one namespace.
///
/// Every repository of a [`Database`] shares the same guard, so concurrent
/// mutations through one `Database` never overwrite each other. Writers in
/// other processes are not covered.
pub type WriteGuard = Arc<Mutex<()>>;

/// Combined storage context with all repositories over one namespace.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn KeyValueStore>,
    /// Reading/todo collections and their links.
    pub items: KvItemRepository,
    /// Known tag names.
    pub tags: KvTagRepository,
    /// Remote channel credentials.
    pub settings: KvSettingsRepository,
    /// Whole-namespace export and import.
    pub snapshots: SnapshotRepository,
}

impl Database {
    /// Create a Database over any key-value store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Create a Database over an already shared store.
    pub fn from_shared(store: Arc<dyn KeyValueStore>) -> Self {
        let guard: WriteGuard = Arc::new(Mutex::new(()));
        Self {
            items: KvItemRepository::new(store.clone(), guard.clone()),
            tags: KvTagRepository::new(store.clone(), guard.clone()),
            settings: KvSettingsRepository::new(store.clone(), guard.clone()),
            snapshots: SnapshotRepository::new(store.clone(), guard),
            store,
        }
    }

    /// Create a Database backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Open (or create on first write) a JSON file backed Database.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = JsonFileStore::open(path.as_ref()).await?;
        Ok(Self::new(store))
    }

    /// Get the underlying key-value store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}
