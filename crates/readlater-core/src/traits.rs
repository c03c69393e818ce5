//! Core traits for ReadLater abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};

use crate::error::Result;
use crate::models::*;

/// Entire contents of the key-value namespace, keyed by slot name.
pub type Namespace = Map<String, JsonValue>;

// =============================================================================
// KEY-VALUE STORE
// =============================================================================

/// Local persistent key-value namespace.
///
/// Values are JSON documents. Multi-slot writes are atomic: either every
/// slot in `entries` is updated or none is.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the given slots. Absent slots are omitted from the result.
    async fn get(&self, keys: &[&str]) -> Result<Namespace>;

    /// Read every slot.
    async fn get_all(&self) -> Result<Namespace>;

    /// Write the given slots, leaving all other slots untouched.
    async fn set(&self, entries: Namespace) -> Result<()>;

    /// Remove every slot.
    async fn clear(&self) -> Result<()>;

    /// Replace the whole namespace with `entries` in one atomic step.
    async fn replace_all(&self, entries: Namespace) -> Result<()>;
}

// =============================================================================
// ENTITY REPOSITORY
// =============================================================================

/// Repository for the reading and todo collections.
///
/// Every mutation reads both collections, applies the change in memory, and
/// writes both back together, so link symmetry holds after each call. Missing
/// ids make update, delete, link and unlink a no-op.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Load both collections, defaulting absent slots to empty lists.
    async fn load_all(&self) -> Result<ItemLists>;

    /// Fetch a reading item by id.
    async fn get_reading_item(&self, id: ItemId) -> Result<Option<ReadingItem>>;

    /// Fetch a todo item by id.
    async fn get_todo_item(&self, id: ItemId) -> Result<Option<TodoItem>>;

    /// Create a reading item at the top of the reading list.
    async fn add_reading_item(&self, req: NewReadingItem) -> Result<ReadingItem>;

    /// Create a todo item at the top of the todo list.
    async fn add_todo_item(&self, req: NewTodoItem) -> Result<TodoItem>;

    /// Replace the fields present in `update`.
    async fn update_reading_item(&self, id: ItemId, update: ReadingItemUpdate) -> Result<()>;

    /// Replace the fields present in `update`.
    async fn update_todo_item(&self, id: ItemId, update: TodoItemUpdate) -> Result<()>;

    /// Sever links to todos, then remove the reading item.
    async fn delete_reading_item(&self, id: ItemId) -> Result<()>;

    /// Sever links to reading items, then remove the todo item.
    async fn delete_todo_item(&self, id: ItemId) -> Result<()>;

    /// Link a todo and a reading item on both sides.
    async fn link_items(&self, todo_id: ItemId, reading_id: ItemId) -> Result<()>;

    /// Remove the link from whichever side exists.
    async fn unlink_items(&self, todo_id: ItemId, reading_id: ItemId) -> Result<()>;
}

// =============================================================================
// TAG REGISTRY
// =============================================================================

/// Repository for the list of known tag names.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Persist the default list or the protected tag if either is missing.
    /// Returns the list as stored afterwards.
    async fn ensure_initialized(&self) -> Result<Vec<String>>;

    /// Current tag list, with defaults and the protected tag applied.
    /// Never writes.
    async fn list_tags(&self) -> Result<Vec<String>>;

    /// Append a tag if it is not already present (case-sensitive).
    async fn add_tag(&self, name: &str) -> Result<()>;

    /// Remove a tag. The protected tag is never removed.
    async fn remove_tag(&self, name: &str) -> Result<()>;
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Repository for the remote channel credential slots.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Credentials if both slots hold a non-blank value.
    async fn load_credentials(&self) -> Result<Option<Credentials>>;

    /// Store both credential slots.
    async fn save_credentials(&self, credentials: &Credentials) -> Result<()>;
}

// =============================================================================
// REMOTE CHANNEL
// =============================================================================

/// Request/response mapping onto a messaging API used as blind storage.
///
/// Implementations hold no state between calls and never retry.
#[async_trait]
pub trait RemoteChannel: Send + Sync {
    /// Post a text message to the chat.
    async fn send_text_message(&self, credentials: &Credentials, text: &str) -> Result<()>;

    /// Upload `content` as a named file attachment.
    async fn send_document(
        &self,
        credentials: &Credentials,
        content: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<SentMessage>;

    /// Pin a message as the chat's highlighted message.
    async fn pin_message(&self, credentials: &Credentials, message_id: i64) -> Result<()>;

    /// Fetch the chat's current state, including its pinned message.
    async fn get_chat_state(&self, credentials: &Credentials) -> Result<ChatState>;

    /// Resolve a file id to a downloadable path. `None` if the API has no path.
    async fn resolve_file_path(
        &self,
        credentials: &Credentials,
        file_id: &str,
    ) -> Result<Option<String>>;

    /// Download the raw bytes behind a resolved path.
    async fn download_file(&self, credentials: &Credentials, path: &str) -> Result<Vec<u8>>;
}
